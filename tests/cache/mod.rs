mod key_value_cache;
mod response_cache;
