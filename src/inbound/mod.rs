//! Inbound adapters.
//!
//! Three variants share one request pipeline and differ in how they
//! answer: `feedback` projects a configurable field list, `verbose`
//! derives its field list from the appended data, and `classic` always
//! writes a fixed legacy XML document.

pub mod classic;
pub mod feedback;
pub mod verbose;

mod adapter;
mod config;
mod variables;
mod tests;

// Re-export public items
pub use adapter::{find_adapter, Classic, Feedback, InboundAdapter, Verbose, ADAPTERS};
pub use config::{refund, ClassicConfig, FailureMatch, MissingPrice, PricePolicy};
pub use variables::{Variable, VariableType, FEEDBACK_REQUEST, FEEDBACK_RESPONSE, VERBOSE_RESPONSE};
