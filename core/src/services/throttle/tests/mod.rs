mod sliding_window_tests;
