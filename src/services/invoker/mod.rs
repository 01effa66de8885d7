pub mod invoker;
pub mod runner;

pub use invoker::{TokioWorkerInvoker, WorkerInvoker};
pub use runner::run;
