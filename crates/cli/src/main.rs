use aura_core::{
    data_file_from_env_value, CoreConfig, Patient, PatientDraft, PatientResult, PatientService,
    SortDirection, SortField,
};
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "aura")]
#[command(about = "AuraHealth patient record CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    List,
    /// Show a single patient
    Get {
        /// Patient ID
        id: String,
    },
    /// Create a patient record
    Create {
        /// Patient ID
        id: String,
        /// Patient name
        name: String,
        /// Patient city
        city: String,
        /// Patient age in years
        age: i64,
        /// Gender: male, female or other
        gender: String,
        /// Height in meters
        height: f64,
        /// Weight in kilograms
        weight: f64,
    },
    /// Replace a patient record
    Update {
        /// Patient ID
        id: String,
        /// Patient name
        name: String,
        /// Patient city
        city: String,
        /// Patient age in years
        age: i64,
        /// Gender: male, female or other
        gender: String,
        /// Height in meters
        height: f64,
        /// Weight in kilograms
        weight: f64,
    },
    /// Delete a patient record
    Delete {
        /// Patient ID
        id: String,
    },
    /// Search patients by name, id or city
    Search {
        /// Case-insensitive term matched against name, id and city
        term: String,
    },
    /// List patients ordered by a field
    Sort {
        /// Field to sort by: id, name, city, age, height, weight or bmi
        field: String,
        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List) => {
            let service = open_service()?;
            print_patients(&service.list_patients());
        }
        Some(Commands::Get { id }) => {
            let service = open_service()?;
            match service.get_patient(&id) {
                Ok(patient) => print_patient(&patient),
                Err(e) => eprintln!("Error reading patient: {}", e),
            }
        }
        Some(Commands::Create {
            id,
            name,
            city,
            age,
            gender,
            height,
            weight,
        }) => {
            let service = open_service()?;
            let draft = PatientDraft {
                id,
                name,
                city,
                age,
                gender,
                height,
                weight,
            };
            match service.create_patient(draft) {
                Ok(patient) => println!(
                    "Created patient '{}' (BMI {}, {})",
                    patient.id, patient.bmi, patient.verdict
                ),
                Err(e) => eprintln!("Error creating patient: {}", e),
            }
        }
        Some(Commands::Update {
            id,
            name,
            city,
            age,
            gender,
            height,
            weight,
        }) => {
            let service = open_service()?;
            let draft = PatientDraft {
                id: id.clone(),
                name,
                city,
                age,
                gender,
                height,
                weight,
            };
            match service.update_patient(&id, draft) {
                Ok(patient) => println!(
                    "Updated patient '{}' (BMI {}, {})",
                    patient.id, patient.bmi, patient.verdict
                ),
                Err(e) => eprintln!("Error updating patient: {}", e),
            }
        }
        Some(Commands::Delete { id }) => {
            let service = open_service()?;
            match service.delete_patient(&id) {
                Ok(patient) => println!("Deleted patient '{}'", patient.id),
                Err(e) => eprintln!("Error deleting patient: {}", e),
            }
        }
        Some(Commands::Search { term }) => {
            let service = open_service()?;
            print_patients(&service.search_patients(&term));
        }
        Some(Commands::Sort { field, desc }) => {
            let service = open_service()?;
            match field.parse::<SortField>() {
                Ok(field) => {
                    let direction = if desc {
                        SortDirection::Descending
                    } else {
                        SortDirection::Ascending
                    };
                    print_patients(&service.sort_patients(field, direction));
                }
                Err(e) => eprintln!("Error sorting patients: {}", e),
            }
        }
        None => {
            println!("Use 'aura --help' for commands");
        }
    }

    Ok(())
}

/// Opens the patient service over the file named by `PATIENT_DATA_FILE`
/// (default `patients.json` in the working directory).
fn open_service() -> PatientResult<PatientService> {
    let data_file = data_file_from_env_value(std::env::var("PATIENT_DATA_FILE").ok());
    let cfg = Arc::new(CoreConfig::new(data_file)?);
    PatientService::open(cfg)
}

fn print_patient(patient: &Patient) {
    println!(
        "ID: {}, Name: {}, City: {}, Age: {}, Gender: {}, Height: {} m, Weight: {} kg, BMI: {} ({})",
        patient.id,
        patient.name,
        patient.city,
        patient.age,
        patient.gender,
        patient.height,
        patient.weight,
        patient.bmi,
        patient.verdict
    );
}

fn print_patients(patients: &[Patient]) {
    if patients.is_empty() {
        println!("No patients found.");
    } else {
        for patient in patients {
            print_patient(patient);
        }
    }
}
