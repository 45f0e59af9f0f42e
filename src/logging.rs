// ClipGlow - Initialisation du systeme de log
//
// Installe un subscriber `tracing` compose de :
// - un filtre `EnvFilter` (variable CLIPGLOW_LOG, defaut "clipglow=info")
// - une couche fmt ecrivant dans %APPDATA%\ClipGlow\clipglow.log via un
//   writer non bloquant de tracing-appender
// - une couche fmt sur stderr en build debug uniquement
//
// Le fichier de log est tronque au demarrage s'il depasse LOG_MAX_BYTES,
// ce qui borne sa taille sans rotation.
//
// # Cycle de vie
// `init` retourne un `WorkerGuard` qui doit rester vivant jusqu'a la fin
// du processus : sa destruction vide le tampon du writer non bloquant.

use crate::constants::{LOG_ENV_VAR, LOG_FILENAME, LOG_MAX_BYTES};
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filtre par defaut quand CLIPGLOW_LOG n'est pas defini.
const DEFAULT_FILTER: &str = "clipglow=info,warn";

/// Initialise le log fichier dans `log_dir`.
///
/// Retourne None si le repertoire ne peut pas etre cree ; dans ce cas
/// seul le log stderr (debug) est actif.
pub fn init(log_dir: &Path) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stderr_layer = cfg!(debug_assertions).then(|| {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
    });

    if fs::create_dir_all(log_dir).is_err() {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        return None;
    }

    let log_path = log_dir.join(LOG_FILENAME);
    truncate_if_oversized(&log_path, LOG_MAX_BYTES);

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILENAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    Some(guard)
}

/// Vide le fichier de log s'il depasse `max_bytes`.
///
/// Retourne true si le fichier a ete tronque.
pub fn truncate_if_oversized(path: &Path, max_bytes: u64) -> bool {
    match fs::metadata(path) {
        Ok(meta) if meta.len() > max_bytes => fs::write(path, b"").is_ok(),
        _ => false,
    }
}
