//! Project draft fields and the consolidated validation rule set.
//!
//! The platform's form variants historically disagreed on the rules
//! (description minimum present or not, pixel cap present or not). Here
//! there is exactly one rule set per context: [`DraftRules::for_context`].

use crate::category::{self, Category};
use crate::image::ImageAttachment;
use crate::types::DbId;

/// Which form the rules apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleContext {
    /// Creating a new project: the strict variant.
    ProjectCreation,
    /// Editing an existing project: the relaxed variant.
    ProjectEdit,
}

/// The validation rules in effect for one draft.
#[derive(Debug, Clone)]
pub struct DraftRules {
    /// Minimum description length in characters (0 = unconstrained).
    pub min_description_chars: usize,
    /// Whether a draft without an image is rejected.
    pub image_required: bool,
    /// Maximum width/height in pixels, if the context caps dimensions.
    pub max_pixel_dim: Option<u32>,
}

impl DraftRules {
    /// The rule set for a given context.
    pub fn for_context(context: RuleContext) -> Self {
        match context {
            RuleContext::ProjectCreation => Self {
                min_description_chars: 300,
                image_required: false,
                max_pixel_dim: Some(crate::image::MAX_PIXEL_DIM),
            },
            RuleContext::ProjectEdit => Self {
                min_description_chars: 0,
                image_required: false,
                max_pixel_dim: None,
            },
        }
    }
}

/// An in-progress, unsaved project submission.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub name: String,
    /// Rich-text body. Length rules count characters, not bytes.
    pub description: String,
    pub category_id: Option<DbId>,
    pub image: Option<ImageAttachment>,
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Aggregated result of validating one draft.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub errors: Vec<FieldViolation>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl ProjectDraft {
    /// Evaluate every rule against this draft.
    ///
    /// `categories` is the reference list the category selection must
    /// resolve against; when it is empty (e.g. the category load failed)
    /// any selection is rejected.
    pub fn validate(&self, rules: &DraftRules, categories: &[Category]) -> ValidationResult {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldViolation {
                field: "name",
                message: "Project name is required".to_string(),
            });
        }

        let description_chars = self.description.chars().count();
        if description_chars < rules.min_description_chars {
            errors.push(FieldViolation {
                field: "description",
                message: format!(
                    "The description must be at least {} characters (got {})",
                    rules.min_description_chars, description_chars
                ),
            });
        }

        match self.category_id {
            None => errors.push(FieldViolation {
                field: "categoryProjectId",
                message: "Category is required".to_string(),
            }),
            Some(id) if id < 1 => errors.push(FieldViolation {
                field: "categoryProjectId",
                message: "Category is required".to_string(),
            }),
            Some(id) if !category::resolves(categories, id) => errors.push(FieldViolation {
                field: "categoryProjectId",
                message: format!("Unknown category {id}"),
            }),
            Some(_) => {}
        }

        match &self.image {
            Some(image) => {
                if let Err(e) = image.validate(rules.max_pixel_dim) {
                    errors.push(FieldViolation {
                        field: "project-image",
                        message: e.to_string(),
                    });
                }
            }
            None if rules.image_required => errors.push(FieldViolation {
                field: "project-image",
                message: "An image is required".to_string(),
            }),
            None => {}
        }

        ValidationResult { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{ImageError, MediaType, MAX_IMAGE_BYTES};

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: 1,
                name: "Reforestation".to_string(),
            },
            Category {
                id: 3,
                name: "Education".to_string(),
            },
        ]
    }

    fn valid_draft() -> ProjectDraft {
        ProjectDraft {
            name: "Reforesting Park X".to_string(),
            description: "x".repeat(310),
            category_id: Some(3),
            image: None,
        }
    }

    fn creation_rules() -> DraftRules {
        DraftRules::for_context(RuleContext::ProjectCreation)
    }

    fn violated_fields(result: &ValidationResult) -> Vec<&'static str> {
        result.errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_draft_passes() {
        let result = valid_draft().validate(&creation_rules(), &categories());
        assert!(result.is_valid(), "unexpected errors: {:?}", result.errors);
    }

    #[test]
    fn test_empty_name_blocked() {
        let mut draft = valid_draft();
        draft.name = "   ".to_string();
        let result = draft.validate(&creation_rules(), &categories());
        assert_eq!(violated_fields(&result), vec!["name"]);
    }

    #[test]
    fn test_short_description_blocked_in_creation_context() {
        let mut draft = valid_draft();
        draft.description = "x".repeat(299);
        let result = draft.validate(&creation_rules(), &categories());
        assert_eq!(violated_fields(&result), vec!["description"]);
    }

    #[test]
    fn test_short_description_allowed_in_edit_context() {
        let mut draft = valid_draft();
        draft.description = "short".to_string();
        let rules = DraftRules::for_context(RuleContext::ProjectEdit);
        assert!(draft.validate(&rules, &categories()).is_valid());
    }

    #[test]
    fn test_description_minimum_counts_characters_not_bytes() {
        let mut draft = valid_draft();
        // 299 two-byte characters: 598 bytes but only 299 characters,
        // so the 300-character minimum must still reject it.
        draft.description = "ã".repeat(299);
        let result = draft.validate(&creation_rules(), &categories());
        assert_eq!(violated_fields(&result), vec!["description"]);
    }

    #[test]
    fn test_missing_category_blocked() {
        let mut draft = valid_draft();
        draft.category_id = None;
        let result = draft.validate(&creation_rules(), &categories());
        assert_eq!(violated_fields(&result), vec!["categoryProjectId"]);
    }

    #[test]
    fn test_non_positive_category_blocked() {
        let mut draft = valid_draft();
        draft.category_id = Some(0);
        let result = draft.validate(&creation_rules(), &categories());
        assert_eq!(violated_fields(&result), vec!["categoryProjectId"]);
    }

    #[test]
    fn test_category_must_resolve_against_loaded_list() {
        let mut draft = valid_draft();
        draft.category_id = Some(99);
        let result = draft.validate(&creation_rules(), &categories());
        assert_eq!(violated_fields(&result), vec!["categoryProjectId"]);
    }

    #[test]
    fn test_empty_category_list_blocks_submission() {
        // Category load failure leaves the list empty; no selection can
        // resolve, so submission is deterministically blocked.
        let result = valid_draft().validate(&creation_rules(), &[]);
        assert_eq!(violated_fields(&result), vec!["categoryProjectId"]);
    }

    #[test]
    fn test_oversized_image_blocked() {
        let mut draft = valid_draft();
        draft.image = Some(ImageAttachment {
            file_name: "big.jpg".to_string(),
            media_type: MediaType::Jpeg,
            bytes: vec![0u8; MAX_IMAGE_BYTES + 1],
        });
        let result = draft.validate(&creation_rules(), &categories());
        assert_eq!(violated_fields(&result), vec!["project-image"]);
    }

    #[test]
    fn test_image_errors_render_as_field_messages() {
        let err = ImageError::TooLarge { size: 6_000_000 };
        assert!(err.to_string().contains("5 MB"));
    }

    #[test]
    fn test_image_required_context_blocks_missing_image() {
        let rules = DraftRules {
            image_required: true,
            ..creation_rules()
        };
        let result = valid_draft().validate(&rules, &categories());
        assert_eq!(violated_fields(&result), vec!["project-image"]);
    }

    #[test]
    fn test_multiple_violations_reported_together() {
        let draft = ProjectDraft::default();
        let result = draft.validate(&creation_rules(), &categories());
        assert_eq!(
            violated_fields(&result),
            vec!["name", "description", "categoryProjectId"]
        );
    }
}
