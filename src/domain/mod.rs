mod attachment;
mod email_address;
mod mobile_number;

pub use attachment::{Attachment, MAX_ATTACHMENT_BYTES};
pub use email_address::EmailAddress;
pub use mobile_number::MobileNumber;
