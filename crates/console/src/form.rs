//! The project draft form: category loading, field validation, AI-assisted
//! content, image preview ownership, and multipart submission.
//!
//! Each [`DraftForm`] owns exactly one draft and moves through
//! `Editing -> Submitting -> Submitted`. A failed submission returns to
//! `Editing` with every field preserved for retry; a successful one is
//! terminal for the form instance.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use greenhub_client::schemas::ProjectSubmission;
use greenhub_client::{ApiError, ProjectApi};
use greenhub_core::category::Category;
use greenhub_core::draft::{DraftRules, FieldViolation, ProjectDraft, ValidationResult};
use greenhub_core::image::{ImageAttachment, ImageError, MediaType};
use greenhub_core::types::DbId;

use crate::session::Session;

/// Where a draft is in its submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    /// Fields are being edited; validation re-evaluates on demand.
    Editing,
    /// A submission is in flight; further submits are suppressed.
    Submitting,
    /// The draft was accepted by the server. Terminal.
    Submitted,
}

/// Why a submission attempt was refused or failed.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("The draft has validation errors")]
    Validation(Vec<FieldViolation>),

    #[error("A submission is already in flight")]
    AlreadySubmitting,

    #[error("This draft was already submitted")]
    AlreadySubmitted,

    #[error("The session has no owning organization")]
    MissingOrganization,

    #[error(transparent)]
    Transport(#[from] ApiError),
}

/// One project draft and its submission state machine.
pub struct DraftForm {
    rules: DraftRules,
    draft: ProjectDraft,
    categories: Vec<Category>,
    state: DraftState,
    /// Revocable preview of the attached image. Owned exclusively by this
    /// form; the file is deleted when replaced or when the form drops.
    preview: Option<NamedTempFile>,
}

impl DraftForm {
    /// Open a new, empty draft under the given rule set.
    pub fn new(rules: DraftRules) -> Self {
        Self {
            rules,
            draft: ProjectDraft::default(),
            categories: Vec::new(),
            state: DraftState::Editing,
            preview: None,
        }
    }

    pub fn state(&self) -> DraftState {
        self.state
    }

    pub fn draft(&self) -> &ProjectDraft {
        &self.draft
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Path of the image preview file, if an image is attached and a
    /// preview could be written.
    pub fn preview_path(&self) -> Option<&Path> {
        self.preview.as_ref().map(|f| f.path())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_category(&mut self, category_id: DbId) {
        self.draft.category_id = Some(category_id);
    }

    /// Fetch the category reference list, once per form activation.
    ///
    /// Fails soft: on error the list is left empty (which blocks any
    /// category from resolving) and the error is returned so the caller
    /// can surface a notification; the rest of the form stays usable.
    pub async fn load_categories(&mut self, api: &dyn ProjectApi) -> Result<(), ApiError> {
        match api.list_categories().await {
            Ok(categories) => {
                tracing::debug!(count = categories.len(), "Categories loaded");
                self.categories = categories;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Category load failed; list left empty");
                self.categories.clear();
                Err(e)
            }
        }
    }

    /// Attach an image, checking it before accepting.
    ///
    /// The bytes are decoded (header only) to measure pixel dimensions
    /// when the rule set caps them. On any failure the previously attached
    /// image and its preview are left untouched. On success the old
    /// preview is revoked and a new one is written.
    pub fn attach_image(
        &mut self,
        file_name: String,
        media_type: MediaType,
        bytes: Vec<u8>,
    ) -> Result<(), ImageError> {
        let candidate = ImageAttachment {
            file_name,
            media_type,
            bytes,
        };
        candidate.validate(self.rules.max_pixel_dim)?;

        // Replacing the preview drops the previous temp file.
        self.preview = write_preview(&candidate.bytes);
        self.draft.image = Some(candidate);
        Ok(())
    }

    /// Clear the attached image and revoke its preview.
    pub fn remove_image(&mut self) {
        self.draft.image = None;
        self.preview = None;
    }

    /// Generate a title and description from a free-text seed.
    ///
    /// On success both fields are overwritten. On failure the draft is
    /// left untouched and the error is returned for a transient
    /// notification.
    pub async fn generate_content(
        &mut self,
        api: &dyn ProjectApi,
        seed: &str,
    ) -> Result<(), ApiError> {
        let content = api.generate_project_content(seed).await?;
        tracing::info!(title = %content.title, "AI content applied to draft");
        self.draft.name = content.title;
        self.draft.description = content.description;
        Ok(())
    }

    /// Evaluate the rule set against the current draft.
    pub fn validate(&self) -> ValidationResult {
        self.draft.validate(&self.rules, &self.categories)
    }

    /// Submit the draft as one multipart request scoped to the session's
    /// owning organization.
    ///
    /// Only an `Editing` draft that passes validation transitions to
    /// `Submitting`; a duplicate submit while one is outstanding is
    /// refused without touching the network.
    pub async fn submit(
        &mut self,
        api: &dyn ProjectApi,
        session: &Session,
    ) -> Result<serde_json::Value, SubmitError> {
        match self.state {
            DraftState::Submitting => return Err(SubmitError::AlreadySubmitting),
            DraftState::Submitted => return Err(SubmitError::AlreadySubmitted),
            DraftState::Editing => {}
        }

        let result = self.validate();
        if !result.is_valid() {
            return Err(SubmitError::Validation(result.errors));
        }

        let ong_id = session.ong_id().ok_or(SubmitError::MissingOrganization)?;
        let category_id = self
            .draft
            .category_id
            .expect("validation guarantees a category id");

        self.state = DraftState::Submitting;
        tracing::info!(ong_id, name = %self.draft.name, "Submitting project");

        let submission = ProjectSubmission {
            name: self.draft.name.clone(),
            description: self.draft.description.clone(),
            category_id,
            image: self.draft.image.clone(),
        };

        match api.create_project(&session.token, ong_id, submission).await {
            Ok(created) => {
                self.state = DraftState::Submitted;
                tracing::info!(ong_id, "Project accepted");
                Ok(created)
            }
            Err(e) => {
                self.state = DraftState::Editing;
                tracing::warn!(error = %e, "Submission failed; draft preserved for retry");
                Err(e.into())
            }
        }
    }
}

/// Write the attachment bytes to a temp file for previewing.
///
/// Preview failure is not a draft error; the attachment stays valid
/// without one.
fn write_preview(bytes: &[u8]) -> Option<NamedTempFile> {
    let mut file = match NamedTempFile::new() {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(error = %e, "Could not create preview file");
            return None;
        }
    };
    if let Err(e) = file.write_all(bytes) {
        tracing::warn!(error = %e, "Could not write preview file");
        return None;
    }
    Some(file)
}
