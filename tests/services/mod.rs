mod cache_aside;
mod listings;
