mod exit;
mod invocation;
