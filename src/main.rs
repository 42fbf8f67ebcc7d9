//! Custom User Store - Entry Point
//!
//! Reads `<username> <password>` lines from stdin and answers each with
//! `OK`, `FAIL` or `ERR <reason>` after checking the configured user table.

use log::{error, info};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use zeroize::Zeroizing;

use custom_userstore::config::RealmConfig;
use custom_userstore::error::handlers::handle_error;
use custom_userstore::utils::logging::setup_logging;
use custom_userstore::{CustomUserStoreManager, Secret, UserStoreBackend};

#[tokio::main]
async fn main() {
    // env_logger picks up RUST_LOG
    setup_logging();

    info!("Launching custom user store...");

    let realm = match RealmConfig::load() {
        Ok(realm) => realm,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let manager = match CustomUserStoreManager::from_config(&realm) {
        Ok(manager) => Arc::new(manager),
        Err(e) => {
            handle_error(&e);
            std::process::exit(1);
        }
    };

    info!(
        "Serving tenant {} from {}",
        realm.tenant_id, realm.connection.url
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => Zeroizing::new(line),
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        let reply = match line.trim_end().split_once(' ') {
            Some((username, password)) => {
                let username = username.to_string();
                let credential = Secret::from(password);
                let manager = Arc::clone(&manager);

                // rusqlite is blocking
                match tokio::task::spawn_blocking(move || {
                    manager.authenticate(&username, credential)
                })
                .await
                {
                    Ok(Ok(true)) => "OK".to_string(),
                    Ok(Ok(false)) => "FAIL".to_string(),
                    Ok(Err(e)) => {
                        handle_error(&e);
                        format!("ERR {}", e)
                    }
                    Err(e) => {
                        error!("Authentication task failed: {}", e);
                        "ERR internal".to_string()
                    }
                }
            }
            None => "ERR expected: <username> <password>".to_string(),
        };

        let written = async {
            stdout.write_all(format!("{}\n", reply).as_bytes()).await?;
            stdout.flush().await
        }
        .await;
        if let Err(e) = written {
            error!("Failed to write reply: {}", e);
            break;
        }
    }

    info!("Input closed, shutting down");
}
