#![deny(warnings)]

//! Rhai-based modding for encounter outcomes.
//!
//! A mod is a directory holding `metadata.yaml` and `script.rhai`. The
//! script defines `fn li_yuen(cash, guns, strength)` returning the tribute
//! Li Yuen demands (zero or less means no demand). The engine still decides
//! when the encounter may happen; scripts only decide its outcome.

use rhai::{Engine, Scope, AST};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use taipan_engine::{EncounterContext, EncounterResolver, LiYuenOutcome};
use thiserror::Error;
use tracing::{info, warn};

/// Schema version of the script hooks this crate calls.
pub const ENGINE_SCHEMA_VERSION: u32 = 1;

const LI_YUEN_HOOK: &str = "li_yuen";
const MAX_OPERATIONS: u64 = 100_000;

/// Metadata for a mod package.
#[derive(Debug, Clone, Deserialize)]
pub struct ModMeta {
    pub id: String,
    pub name: String,
    pub version: String,
    pub engine_schema_version: u32,
    pub hooks: Option<Vec<String>>, // e.g., ["li_yuen"]
}

#[derive(Debug, Error)]
pub enum ModError {
    #[error("invalid metadata: {0}")]
    InvalidMeta(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("rhai error: {0}")]
    Rhai(String),
    #[error("script does not define fn {0}(cash, guns, strength)")]
    MissingHook(&'static str),
}

impl From<std::io::Error> for ModError {
    fn from(e: std::io::Error) -> Self {
        ModError::Io(e.to_string())
    }
}

impl From<Box<rhai::EvalAltResult>> for ModError {
    fn from(e: Box<rhai::EvalAltResult>) -> Self {
        ModError::Rhai(e.to_string())
    }
}

impl From<rhai::ParseError> for ModError {
    fn from(e: rhai::ParseError) -> Self {
        ModError::Rhai(e.to_string())
    }
}

/// Returns a Rhai engine with an operation budget so scripts cannot hang the game.
pub fn new_engine() -> Engine {
    let mut engine = Engine::new();
    engine.set_max_operations(MAX_OPERATIONS);
    engine
}

/// Encounter resolver backed by a compiled Rhai script.
pub struct ScriptedEncounters {
    meta: Option<ModMeta>,
    engine: Engine,
    ast: AST,
}

impl ScriptedEncounters {
    /// Compile a script and check it defines the `li_yuen` hook.
    pub fn from_script(script: &str) -> Result<Self, ModError> {
        let engine = new_engine();
        let ast = engine.compile(script)?;
        let has_hook = ast
            .iter_functions()
            .any(|f| f.name == LI_YUEN_HOOK && f.params.len() == 3);
        if !has_hook {
            return Err(ModError::MissingHook(LI_YUEN_HOOK));
        }
        Ok(Self {
            meta: None,
            engine,
            ast,
        })
    }

    /// Load a mod directory containing `metadata.yaml` and `script.rhai`.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ModError> {
        let dir = dir.as_ref();
        let meta_text = fs::read_to_string(dir.join("metadata.yaml"))?;
        let meta: ModMeta =
            serde_yaml::from_str(&meta_text).map_err(|e| ModError::InvalidMeta(e.to_string()))?;
        if meta.engine_schema_version != ENGINE_SCHEMA_VERSION {
            return Err(ModError::InvalidMeta(format!(
                "{} targets schema {}, engine supports {}",
                meta.id, meta.engine_schema_version, ENGINE_SCHEMA_VERSION
            )));
        }
        let script = fs::read_to_string(dir.join("script.rhai"))?;
        let mut loaded = Self::from_script(&script)?;
        info!("Loaded mod: {} ({})", meta.id, meta.version);
        loaded.meta = Some(meta);
        Ok(loaded)
    }

    /// Metadata, when loaded from a mod directory.
    pub fn meta(&self) -> Option<&ModMeta> {
        self.meta.as_ref()
    }

    /// Evaluate the tribute the script asks for.
    pub fn eval_tribute(&self, ctx: &EncounterContext) -> Result<i64, ModError> {
        let cash = i64::try_from(ctx.cash).unwrap_or(i64::MAX);
        let args = (cash, i64::from(ctx.guns), ctx.enemy_strength);
        let mut scope = Scope::new();
        let tribute = self
            .engine
            .call_fn::<i64>(&mut scope, &self.ast, LI_YUEN_HOOK, args)?;
        Ok(tribute)
    }
}

impl EncounterResolver for ScriptedEncounters {
    fn li_yuen(&mut self, ctx: &EncounterContext) -> LiYuenOutcome {
        match self.eval_tribute(ctx) {
            Ok(t) if t > 0 => LiYuenOutcome::Tribute(t as u64),
            Ok(_) => LiYuenOutcome::Declined,
            Err(e) => {
                warn!("li_yuen script failed, treating as declined: {e}");
                LiYuenOutcome::Declined
            }
        }
    }
}

/// Load every mod directory under `root` that declares the `li_yuen` hook.
/// Directories without both files are skipped.
pub fn load_all<P: AsRef<Path>>(root: P) -> Result<Vec<ScriptedEncounters>, ModError> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    for ent in fs::read_dir(root.as_ref())? {
        let ent = ent?;
        if !ent.file_type()?.is_dir() {
            continue;
        }
        let dir = ent.path();
        if dir.join("metadata.yaml").exists() && dir.join("script.rhai").exists() {
            dirs.push(dir);
        }
    }
    dirs.sort();
    let mut mods = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let m = ScriptedEncounters::load_dir(&dir)?;
        let declares_hook = m
            .meta()
            .and_then(|meta| meta.hooks.as_ref())
            .map_or(true, |hooks| hooks.iter().any(|h| h == LI_YUEN_HOOK));
        if declares_hook {
            mods.push(m);
        }
    }
    Ok(mods)
}
