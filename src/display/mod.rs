//! Display formatting for terminal output

pub mod request;

pub use request::{
    format_payment_details, format_receipt, format_request_details, format_request_list,
};
