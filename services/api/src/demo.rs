use crate::infra::{InMemoryMedicationRequestRepository, LoggingEmailSender};
use clap::Args;
use medication_requests::config::{AppConfig, NotificationConfig};
use medication_requests::error::AppError;
use medication_requests::workflows::medication::{
    MedicationRequestId, MedicationRequestRepository, MedicationRequestService,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ProcessArgs {
    /// Identifier of the seeded request to process (1-3 are seeded)
    #[arg(long)]
    pub(crate) id: u64,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the body of every dispatched email
    #[arg(long)]
    pub(crate) show_bodies: bool,
}

type DemoService =
    MedicationRequestService<InMemoryMedicationRequestRepository, LoggingEmailSender>;

fn seeded_service(
    notifications: &NotificationConfig,
) -> (
    DemoService,
    Arc<InMemoryMedicationRequestRepository>,
    Arc<LoggingEmailSender>,
) {
    let repository = Arc::new(InMemoryMedicationRequestRepository::default());
    repository.seed_demo();
    let email = Arc::new(LoggingEmailSender::new(notifications));
    let service = MedicationRequestService::new(repository.clone(), email.clone());
    (service, repository, email)
}

pub(crate) async fn run_process(args: ProcessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let (service, _, email) = seeded_service(&config.notifications);

    let result = service.process(MedicationRequestId(args.id)).await?;
    println!("{}: {}", result.medication_name, result.message);
    for sent in email.outbox() {
        println!("  email {} -> {} ({})", sent.from, sent.to, sent.subject);
    }
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let (service, repository, email) = seeded_service(&config.notifications);

    println!("Medication request processing demo");
    for raw_id in 1..=4 {
        let id = MedicationRequestId(raw_id);
        let snapshot = match repository.get_one(id).await {
            Ok(Some(request)) => format!(
                "{} requested {} of {} ({} on hand)",
                request.patient_name,
                request.quantity,
                request.medication.name,
                request.medication.quantity
            ),
            Ok(None) => "no stored request".to_string(),
            Err(err) => format!("lookup unavailable: {err}"),
        };
        println!("\nRequest {id}: {snapshot}");

        match service.process(id).await {
            Ok(result) => println!("  -> {}", result.message),
            Err(err) => println!("  -> rejected [{}]: {}", err.kind(), err),
        }
    }

    let outbox = email.outbox();
    println!("\nDispatched email: {}", outbox.len());
    for sent in outbox {
        println!(
            "- {} -> {} | {} | {}",
            sent.sent_at.format("%Y-%m-%d %H:%M:%S"),
            sent.to,
            sent.subject,
            sent.from
        );
        if args.show_bodies {
            println!("{}", sent.body);
        }
    }

    Ok(())
}
