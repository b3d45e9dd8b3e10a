mod result_parsing;
