// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{bail, Context, Result};
use application::{AuthProvider, DataApi, NotesView, ObjectStorage};
use cli::args::{Args, Command};
use domain::{ImageUpload, NoteId, Session};
use infrastructure::config::{AuthMode, BackendKind, StorageKind};
use infrastructure::{
    Config, ConfigAuthProvider, Credentials, DirectoryStorage, GraphqlDataApi, HttpObjectStorage,
    SqliteDataApi,
};
use ports::{HtmlPresenter, TablePresenter};
use std::path::Path;
use tracing::{debug, info};

type View = NotesView<Box<dyn DataApi>, Box<dyn ObjectStorage>>;

/// Everything a view command works on: the loaded config, the session's
/// auth provider, and the mounted view
struct Workspace {
    config: Config,
    auth: ConfigAuthProvider,
    view: View,
}

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting notesview with arguments");
    let config_path = args.config.as_deref();

    match args.command {
        Command::InitConfig { force } => init_config(config_path, force),
        Command::List { json } => list(&open_workspace(config_path)?.view, json),
        Command::Create {
            name,
            description,
            image,
        } => {
            let mut view = open_workspace(config_path)?.view;
            let form = view.form_mut();
            form.set_name(name);
            form.set_description(description);
            if let Some(path) = image {
                form.attach_image(read_image(&path)?);
            }
            let note = view.submit()?;
            println!("Created note {}", note.id);
            Ok(())
        }
        Command::Edit {
            note_id,
            name,
            description,
            image,
        } => {
            let mut view = open_workspace(config_path)?.view;
            view.select_edit(&NoteId::new(note_id))?;
            let form = view.form_mut();
            if let Some(name) = name {
                form.set_name(name);
            }
            if let Some(description) = description {
                form.set_description(description);
            }
            if let Some(path) = image {
                form.attach_image(read_image(&path)?);
            }
            let note = view.submit()?;
            println!("Updated note {}", note.id);
            Ok(())
        }
        Command::Delete { note_id } => {
            let mut view = open_workspace(config_path)?.view;
            let id = NoteId::new(note_id);
            view.delete_note(&id)?;
            println!("Deleted note {}", id);
            Ok(())
        }
        Command::Render => render(&open_workspace(config_path)?.view),
        Command::SignOut => sign_out(open_workspace(config_path)?, config_path),
    }
}

fn init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path()?,
    };
    if path.exists() && !force {
        bail!("Config file already exists: {} (use --force to overwrite)", path.display());
    }
    Config::create_default(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn open_workspace(config_path: Option<&Path>) -> Result<Workspace> {
    // Initialize infrastructure
    let config = Config::load_or_default(config_path)?;
    config.validate()?;

    let auth = ConfigAuthProvider::from_config(&config.auth);
    let session = auth.session();
    let (data_api, storage) = build_backend(&config, &session)?;

    // Initialize application
    let mut view = NotesView::new(session, data_api, storage)
        .context("Cannot open the notes view without a session; set auth.username")?
        .with_key_policy(config.storage.key_policy);
    view.mount()?;

    Ok(Workspace { config, auth, view })
}

fn list(view: &View, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view.rows())?);
    } else {
        print!("{}", TablePresenter::new().render(view.rows()));
    }
    Ok(())
}

fn render(view: &View) -> Result<()> {
    let html = HtmlPresenter::new().render(&view.page());
    let mut renderer = infrastructure::renderer::PageRenderer::new();
    let temp_path = renderer.create_temp_file(&html)?;
    info!(?temp_path, "Opening notes page");
    renderer.open_in_browser(&temp_path)
}

fn sign_out(workspace: Workspace, config_path: Option<&Path>) -> Result<()> {
    let Workspace {
        config,
        mut auth,
        mut view,
    } = workspace;
    let username = view.session().username().unwrap_or_default().to_string();
    view.sign_out(&mut auth)?;
    forget_session(config, config_path)?;
    println!("Signed out {}", username);
    Ok(())
}

/// Wire the configured data API and object storage
pub fn build_backend(
    config: &Config,
    session: &Session,
) -> Result<(Box<dyn DataApi>, Box<dyn ObjectStorage>)> {
    let data_api: Box<dyn DataApi> = match config.backend.kind {
        BackendKind::Local => Box::new(SqliteDataApi::open(config.database_path()?)?),
        BackendKind::Graphql => {
            let credentials = match config.backend.auth_mode {
                AuthMode::ApiKey => Credentials::ApiKey(config.backend.api_key.clone()),
                AuthMode::UserPool => match session {
                    Session::SignedIn(user) => Credentials::Token(
                        user.id_token
                            .clone()
                            .context("Signed-in session carries no id token")?,
                    ),
                    Session::SignedOut => bail!("User-pool mode requires a signed-in session"),
                },
            };
            Box::new(GraphqlDataApi::new(
                &config.backend.endpoint,
                credentials,
                config.backend.timeout(),
            )?)
        }
    };

    let storage: Box<dyn ObjectStorage> = match config.storage.kind {
        StorageKind::Directory => Box::new(DirectoryStorage::new(config.storage_path()?)?),
        StorageKind::Http => Box::new(HttpObjectStorage::new(
            &config.storage.base_url,
            config.backend.timeout(),
        )?),
    };

    debug!(backend = ?config.backend.kind, storage = ?config.storage.kind, "Built backend");
    Ok((data_api, storage))
}

/// Clear the stored credentials so later invocations start signed out
fn forget_session(mut config: Config, config_path: Option<&Path>) -> Result<()> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path()?,
    };
    if !path.exists() {
        debug!(?path, "No config file holds the session");
        return Ok(());
    }
    config.auth.username.clear();
    config.auth.id_token.clear();
    config.save(&path)
}

fn read_image(path: &Path) -> Result<ImageUpload> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(ImageUpload::new(file_name, bytes))
}
