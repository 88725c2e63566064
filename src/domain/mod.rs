pub mod contact;

pub use contact::{validate_contact, ContactInquiry, NewInquiry, RawContactPayload};
