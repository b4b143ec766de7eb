use crate::cli::query::args::Query;
use crate::cli::query::read::Entity;
use eyre::{Result, eyre};
use serde::Serialize;
use store::client::Client;
use store::prescription::model::PrescriptionFilter;
use store::projection::Projection;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn select(query: &Query) -> Result<()> {
    let client = Client::open(&query.db_path).await?;
    let projection = Projection::new(client.clone());

    match query.entity {
        Entity::Prescription => match query.id {
            Some(id) => {
                let prescription = projection
                    .prescriptions()
                    .get_prescription(id)
                    .await?
                    .ok_or(eyre!("Prescription {id} Not Found"))?;
                print_json(&prescription)?;
            }
            None => {
                let filter = PrescriptionFilter {
                    doctor: query.doctor.clone(),
                    patient_hash: query.patient_hash.clone(),
                    limit: query.limit,
                };
                let prescriptions = projection.prescriptions().query_prescriptions(&filter).await?;
                if prescriptions.is_empty() {
                    println!("No Prescriptions Found")
                } else {
                    print_json(&prescriptions)?;
                }
            }
        },
        Entity::Batch => match query.id {
            Some(id) => {
                let batch = projection
                    .batches()
                    .get_batch(id)
                    .await?
                    .ok_or(eyre!("Batch {id} Not Found"))?;
                print_json(&batch)?;
            }
            None => {
                let batches = projection.batches().query_batches(query.limit).await?;
                if batches.is_empty() {
                    println!("No Batches Found")
                } else {
                    print_json(&batches)?;
                }
            }
        },
        Entity::Checkpoint => {
            let checkpoint_store = store::checkpoint::store::Store::new(client.clone());

            let checkpoint = checkpoint_store
                .get_last_checkpoint()
                .await?
                .ok_or(eyre!("Checkpoint Not Found"))?;

            print_json(&checkpoint)?;
        }
    }

    Ok(())
}
