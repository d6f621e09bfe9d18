mod omp_test_support;
