pub mod invoker;
