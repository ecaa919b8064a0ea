use mime::Mime;

/// Largest accepted attachment, in bytes (5 MiB)
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

/// A validated file attachment supplied with a creator signup
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    data: Vec<u8>,
    content_type: Mime,
}

impl Attachment {
    /// Validate the raw upload. Rejections carry a message naming the rule
    /// that failed, suitable for showing next to the form field.
    pub fn new(data: Vec<u8>, content_type: Option<Mime>) -> Result<Self, String> {
        let content_type = content_type
            .filter(is_allowed_type)
            .ok_or("Only JPEG, PNG, GIF and PDF attachments are accepted")?;

        if data.len() > MAX_ATTACHMENT_BYTES {
            return Err("Attachments must be 5MB or smaller".into());
        }

        Ok(Self { data, content_type })
    }

    pub fn content_type(&self) -> &Mime {
        &self.content_type
    }

    /// File extension matching the validated MIME type
    pub fn extension(&self) -> &'static str {
        match (self.content_type.type_(), self.content_type.subtype()) {
            (mime::IMAGE, mime::JPEG) => "jpg",
            (mime::IMAGE, mime::PNG) => "png",
            (mime::IMAGE, mime::GIF) => "gif",
            _ => "pdf",
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

fn is_allowed_type(content_type: &Mime) -> bool {
    matches!(
        (content_type.type_(), content_type.subtype()),
        (mime::IMAGE, mime::JPEG)
            | (mime::IMAGE, mime::PNG)
            | (mime::IMAGE, mime::GIF)
            | (mime::APPLICATION, mime::PDF)
    )
}
