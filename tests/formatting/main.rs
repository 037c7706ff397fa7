mod printer;
