fn main() {
    omp_lower::start_cli();
}
