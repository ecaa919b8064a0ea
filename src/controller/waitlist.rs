use actix_multipart::form::bytes::Bytes as UploadedFile;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::dev::HttpServiceFactory;
use actix_web::{post, web, HttpResponse, Responder};

use crate::client::{attachment_object_name, StorageClient};
use crate::domain::{Attachment, EmailAddress, MobileNumber};
use crate::error::{RestError, RestResult};
use crate::model::{NewEntry, Role, SignupDetails};
use crate::repo::WaitlistStore;

#[derive(MultipartForm)]
pub struct SignupForm {
    role: Text<String>,
    email: Text<String>,
    mobile: Option<Text<String>>,
    notify_creator_tools: Option<Text<String>>,
    suggestions: Option<Text<String>>,
    story_idea: Option<Text<String>>,
    file: Option<UploadedFile>,
}

/// Form input after field-level validation, before any I/O
struct ValidatedSignup {
    email: EmailAddress,
    mobile: Option<MobileNumber>,
    role: Role,
    notify_creator_tools: bool,
    suggestions: Option<String>,
    story_idea: Option<String>,
    attachment: Option<Attachment>,
}

impl TryFrom<SignupForm> for ValidatedSignup {
    type Error = String;

    fn try_from(form: SignupForm) -> Result<Self, Self::Error> {
        let role: Role = form.role.0.parse()?;
        let email: EmailAddress = form.email.0.parse()?;

        let mobile_raw = form.mobile.map(|t| t.0).unwrap_or_default();
        let mobile = MobileNumber::parse_optional(&mobile_raw)?;

        let notify_creator_tools = form
            .notify_creator_tools
            .map(|t| matches!(t.0.as_str(), "true" | "on" | "1" | "yes"))
            .unwrap_or(false);

        // Browsers send an empty part when no file was picked
        let attachment = form
            .file
            .filter(|f| !f.data.is_empty())
            .map(|f| Attachment::new(f.data.to_vec(), f.content_type))
            .transpose()?;

        Ok(Self {
            email,
            mobile,
            role,
            notify_creator_tools,
            suggestions: form.suggestions.map(|t| t.0).filter(|s| !s.is_empty()),
            story_idea: form.story_idea.map(|t| t.0).filter(|s| !s.is_empty()),
            attachment,
        })
    }
}

#[tracing::instrument(name = "Waitlist signup", skip_all)]
#[post("")]
async fn submit(
    form: MultipartForm<SignupForm>,
    store: web::Data<dyn WaitlistStore>,
    file_store: web::Data<StorageClient>,
) -> RestResult<impl Responder> {
    let signup: ValidatedSignup = form
        .into_inner()
        .try_into()
        .map_err(RestError::ValidationError)?;

    // Attachments only apply to creator signups; a reader-supplied file is
    // dropped rather than uploaded
    let uploaded = match (signup.role, signup.attachment) {
        (Role::Creator, Some(attachment)) => {
            let object_name = attachment_object_name(signup.role, attachment.extension());
            let content_type = attachment.content_type().clone();

            let url = file_store
                .upload(&object_name, &content_type, attachment.into_bytes())
                .await
                .map_err(|error| {
                    tracing::error!("Attachment upload failed: {:?}", error);
                    RestError::UploadFailure
                })?;

            Some((object_name, url))
        }
        _ => None,
    };

    let details = match signup.role {
        Role::Reader => SignupDetails::Reader {
            suggestions: signup.suggestions,
        },
        Role::Creator => SignupDetails::Creator {
            notify_creator_tools: signup.notify_creator_tools,
            story_idea: signup.story_idea,
            file_url: uploaded.as_ref().map(|(_, url)| url.clone()),
        },
    };

    let entry = NewEntry {
        email: signup.email,
        mobile: signup.mobile,
        details,
    };

    if let Err(error) = store.insert(&entry).await {
        // The entry was not persisted; clean up the uploaded-but-unlinked
        // attachment so the file store does not accumulate orphans
        if let Some((object_name, _)) = uploaded {
            if let Err(delete_error) = file_store.delete(&object_name).await {
                tracing::warn!(
                    "Failed to delete orphaned attachment {}: {:?}",
                    object_name,
                    delete_error
                );
            }
        }
        return Err(error.into());
    }

    Ok(HttpResponse::Created())
}

/// Public waitlist API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/waitlist").service(submit)
}
