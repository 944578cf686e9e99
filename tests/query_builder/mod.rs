mod filter_set;
