use clap::{Parser, Subcommand};
use symptom_core::{resolve_config, DiagnosisService, SymptomError};

#[derive(Parser)]
#[command(name = "symptom")]
#[command(about = "Symptom checker CLI")]
struct Cli {
    /// Directory holding disease_model.json and Training.csv
    #[arg(long, env = "SYMPTOM_DATA_DIR", global = true)]
    data_dir: Option<String>,
    /// Model artifact path (overrides --data-dir)
    #[arg(long, env = "SYMPTOM_MODEL_PATH", global = true)]
    model: Option<String>,
    /// Reference dataset path (overrides --data-dir)
    #[arg(long, env = "SYMPTOM_DATASET_PATH", global = true)]
    dataset: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict likely diseases (at least 3 symptoms)
    Predict {
        /// Symptom identifiers, e.g. itching skin_rash nodal_skin_eruptions
        symptoms: Vec<String>,
    },
    /// Suggest symptoms that often occur with the given ones
    Related {
        /// Symptom identifiers
        symptoms: Vec<String>,
    },
    /// List recognised symptoms
    Symptoms,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'symptom --help' for commands");
        return Ok(());
    };

    let cfg = resolve_config(cli.data_dir, cli.model, cli.dataset)?;
    let service = match DiagnosisService::try_load(&cfg) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Error loading artifacts: {}", e);
            DiagnosisService::degraded(e.to_string())
        }
    };

    match command {
        Commands::Predict { symptoms } => match service.predict(&symptoms) {
            Ok(predictions) if predictions.is_empty() => {
                println!("No disease reached the minimum confidence.");
            }
            Ok(predictions) => {
                for (rank, p) in predictions.iter().enumerate() {
                    println!("{}. {} ({:.2}%)", rank + 1, p.disease, p.confidence);
                }
            }
            Err(e @ (SymptomError::InsufficientInput { .. } | SymptomError::ModelUnavailable)) => {
                println!("{}", e);
            }
            Err(e) => return Err(e.into()),
        },
        Commands::Related { symptoms } => {
            let related = service.related_symptoms(&symptoms);
            if related.is_empty() {
                println!("No related symptoms found.");
            } else {
                for symptom in related {
                    println!("{}", symptom);
                }
            }
        }
        Commands::Symptoms => {
            let vocabulary = service.vocabulary();
            if vocabulary.is_empty() {
                println!("No symptoms loaded.");
            } else {
                for symptom in vocabulary {
                    println!("{}", symptom);
                }
            }
        }
    }

    Ok(())
}
