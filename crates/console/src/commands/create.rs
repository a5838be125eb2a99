use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};

use greenhub_core::draft::{DraftRules, RuleContext};
use greenhub_core::image::MediaType;
use greenhub_core::types::DbId;

use crate::config::ConsoleConfig;
use crate::form::{DraftForm, SubmitError};
use crate::session::SessionStore;

/// Arguments for `greenhub create-project`.
#[derive(Debug, clap::Args)]
pub struct CreateProjectArgs {
    /// Project name. Overrides an AI-generated title.
    #[arg(long)]
    pub name: Option<String>,

    /// Project description text.
    #[arg(long)]
    pub description: Option<String>,

    /// Read the description from a file instead.
    #[arg(long, conflicts_with = "description")]
    pub description_file: Option<PathBuf>,

    /// Category id (see `greenhub categories`).
    #[arg(long)]
    pub category: Option<DbId>,

    /// Image to attach (jpg, jpeg or png; at most 5 MB and 1500x1500).
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Free-text seed for AI-generated title and description.
    #[arg(long)]
    pub ai_seed: Option<String>,
}

/// Drive one draft through the form: categories, optional AI content,
/// field edits, optional image, submission.
pub async fn run(config: &ConsoleConfig, args: CreateProjectArgs) -> anyhow::Result<()> {
    let api = super::api_client(config)?;

    let mut store = SessionStore::new(config.token_path.clone());
    let session = match store.restore() {
        Some(session) => session.clone(),
        None => bail!("Not logged in. Run `greenhub login` first."),
    };

    let mut form = DraftForm::new(DraftRules::for_context(RuleContext::ProjectCreation));

    // Fail-soft: the form stays usable, submission will simply not
    // resolve any category.
    if let Err(e) = form.load_categories(&api).await {
        eprintln!("Could not load categories: {e}");
    }

    if let Some(seed) = &args.ai_seed {
        match form.generate_content(&api, seed).await {
            Ok(()) => println!("Applied AI-generated title and description."),
            Err(e) => eprintln!("Could not generate project content: {e}"),
        }
    }

    // Explicit flags are user edits; they take precedence over AI output.
    if let Some(name) = args.name {
        form.set_name(name);
    }
    if let Some(description) = args.description {
        form.set_description(description);
    } else if let Some(path) = &args.description_file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        form.set_description(text);
    }
    if let Some(category) = args.category {
        form.set_category(category);
    }

    if let Some(path) = &args.image {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        let media_type = MediaType::from_extension(ext).map_err(|e| anyhow!("{e}"))?;
        let bytes =
            fs::read(path).with_context(|| format!("Could not read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project-image".to_string());

        form.attach_image(file_name, media_type, bytes)
            .map_err(|e| anyhow!("{e}"))?;
        if let Some(preview) = form.preview_path() {
            println!("Image accepted; preview at {}", preview.display());
        }
    }

    match form.submit(&api, &session).await {
        Ok(_) => {
            println!("Project created successfully; await administrator confirmation.");
            Ok(())
        }
        Err(SubmitError::Validation(errors)) => {
            for violation in &errors {
                eprintln!("  {}: {}", violation.field, violation.message);
            }
            bail!("The draft has {} validation error(s)", errors.len());
        }
        Err(e) => bail!("Error creating the project: {e}"),
    }
}
