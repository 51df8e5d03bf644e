mod row_mapping_tests;
