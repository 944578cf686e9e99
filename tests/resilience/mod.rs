mod circuit_breaker;
mod retry;
