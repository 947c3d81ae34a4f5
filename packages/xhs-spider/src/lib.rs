mod error;
pub mod search;

pub use error::{Error, Result};
pub use search::{SearchOutcome, SearchProvider, Sidecar, search_notes};

use std::{future::Future, pin::Pin};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
