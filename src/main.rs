use std::io::{self, BufRead, Write};

use anyhow::Result;
use dotenvy::dotenv;
use tracing::{error, info};

use vehicle_registration_form::cache::open_store;
use vehicle_registration_form::config::EnvironmentConfig;
use vehicle_registration_form::controllers::form_controller::{Command, FormController, Outcome, HELP};
use vehicle_registration_form::FormDraft;

fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging (stderr, para no mezclarlo con el formulario)
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(io::stderr)
        .init();

    info!("🚚 Транспортные средства и водители");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    let store = match open_store(&config.draft) {
        Ok(store) => store,
        Err(e) => {
            error!("❌ Error abriendo el almacén de borradores: {}", e);
            return Err(anyhow::anyhow!("Error del almacén de borradores: {}", e));
        }
    };

    let today = chrono::Local::now().date_naive();
    let form = FormDraft::mount_with(store, config.draft.key.clone(), today);
    let mut controller = FormController::new(form);

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    writeln!(out, "{}", HELP)?;
    out.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                if controller.handle(command, &mut out)? == Outcome::Exit {
                    break;
                }
            }
            Err(e) => writeln!(out, "⚠️ {}", e)?,
        }
        out.flush()?;
    }

    info!("👋 Formulario cerrado");
    Ok(())
}
