//! Demo records for the dashboard snapshot.

use chrono::NaiveDate;
use medclinic_core::activity::{ActivityRecord, Channel, DeliveryStatus};
use medclinic_core::billing::BillingItem;
use medclinic_core::error::CoreError;
use medclinic_core::medication::{DoseRecord, DoseStatus};
use medclinic_core::pipeline::{Lead, Stage};
use medclinic_core::queue::{QueueEntry, QueuePriority, QueueStatus, WaitingQueue};
use medclinic_core::schedule::{Appointment, AppointmentMode, AppointmentStatus};
use medclinic_core::types::RecordId;

/// Every list the dashboard renders.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub queue: WaitingQueue,
    pub activity: Vec<ActivityRecord>,
    pub leads: Vec<Lead>,
    pub billing: Vec<BillingItem>,
    pub doses: Vec<DoseRecord>,
    pub appointments: Vec<Appointment>,
}

impl SeedData {
    pub fn demo() -> Result<Self, CoreError> {
        Ok(Self {
            queue: demo_queue()?,
            activity: demo_activity(),
            leads: demo_leads()?,
            billing: demo_billing(),
            doses: demo_doses()?,
            appointments: demo_appointments()?,
        })
    }
}

fn date(month: u32, day: u32) -> Result<NaiveDate, CoreError> {
    NaiveDate::from_ymd_opt(2024, month, day)
        .ok_or_else(|| CoreError::Validation(format!("Invalid seed date 2024-{month}-{day}")))
}

#[allow(clippy::too_many_arguments)]
fn queue_entry(
    id: RecordId,
    patient: &str,
    service: &str,
    professional: &str,
    check_in: &str,
    waiting_minutes: u32,
    priority: QueuePriority,
    status: QueueStatus,
) -> QueueEntry {
    QueueEntry {
        id,
        patient_name: patient.to_string(),
        service: service.to_string(),
        professional: professional.to_string(),
        check_in_time: check_in.to_string(),
        waiting_minutes,
        priority,
        status,
    }
}

pub fn demo_queue() -> Result<WaitingQueue, CoreError> {
    use QueuePriority::{High, Normal, Urgent};
    use QueueStatus::{InProgress, Ready, Waiting};

    WaitingQueue::from_entries(vec![
        queue_entry(1, "Maria Oliveira", "Consulta", "Dr. Silva", "08:10", 35, Normal, Waiting),
        queue_entry(2, "Joao Santos", "Retorno", "Dra. Costa", "08:25", 20, High, Ready),
        queue_entry(3, "Ana Pereira", "Exame", "Dr. Silva", "08:40", 12, Normal, InProgress),
        queue_entry(4, "Carlos Lima", "Consulta", "Dr. Mendes", "08:55", 8, Urgent, Waiting),
        queue_entry(5, "Beatriz Souza", "Exame", "Dra. Costa", "09:05", 3, Normal, Waiting),
    ])
}

fn activity(
    id: RecordId,
    kind: &str,
    recipient: &str,
    channel: Channel,
    status: DeliveryStatus,
    timestamp: &str,
) -> ActivityRecord {
    ActivityRecord {
        id,
        kind: kind.to_string(),
        recipient: recipient.to_string(),
        channel,
        status,
        timestamp: timestamp.to_string(),
    }
}

pub fn demo_activity() -> Vec<ActivityRecord> {
    use Channel::{Email, Push, Sms, Whatsapp};
    use DeliveryStatus::{Delivered, Failed, Pending};

    vec![
        activity(1, "Appointment reminder", "Maria Oliveira", Whatsapp, Delivered, "Today, 07:30"),
        activity(2, "Exam results", "Joao Santos", Email, Delivered, "Today, 07:45"),
        activity(3, "Appointment reminder", "Ana Pereira", Sms, Failed, "Today, 08:00"),
        activity(4, "Payment receipt", "Carlos Lima", Email, Pending, "Today, 08:20"),
        activity(5, "Birthday greeting", "Beatriz Souza", Push, Delivered, "Yesterday, 18:00"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn lead(
    id: RecordId,
    name: &str,
    source: Channel,
    professional: &str,
    stage: Stage,
    score: u8,
    estimated_value: i64,
    created_on: NaiveDate,
) -> Result<Lead, CoreError> {
    let lead = Lead {
        id,
        name: name.to_string(),
        source,
        professional: professional.to_string(),
        stage,
        score,
        estimated_value,
        created_on,
    };
    lead.validate()?;
    Ok(lead)
}

pub fn demo_leads() -> Result<Vec<Lead>, CoreError> {
    use Channel::{Email, Push, Sms, Whatsapp};
    use Stage::{Lost, Negotiation, New, Qualified, Won};

    Ok(vec![
        lead(1, "Fernanda Rocha", Whatsapp, "Dr. Silva", New, 32, 45_000, date(5, 2)?)?,
        lead(2, "Gustavo Nunes", Email, "Dra. Costa", Qualified, 68, 120_000, date(5, 6)?)?,
        lead(3, "Helena Martins", Whatsapp, "Dr. Silva", Negotiation, 84, 250_000, date(5, 9)?)?,
        lead(4, "Igor Teixeira", Sms, "Dr. Mendes", Won, 97, 80_000, date(5, 12)?)?,
        lead(5, "Julia Campos", Push, "Dra. Costa", Lost, 41, 60_000, date(5, 15)?)?,
    ])
}

pub fn demo_billing() -> Vec<BillingItem> {
    let item = |code: &str, description: &str, quantity: u32, unit_price: i64, selected: bool| {
        BillingItem {
            code: code.to_string(),
            description: description.to_string(),
            quantity,
            unit_price,
            selected,
        }
    };
    vec![
        item("10101012", "Consulta em consultorio", 1, 25_000, true),
        item("40301630", "Hemograma completo", 1, 1_850, true),
        item("40302040", "Glicose", 2, 990, true),
        item("40304361", "TSH", 1, 3_200, false),
    ]
}

pub fn demo_doses() -> Result<Vec<DoseRecord>, CoreError> {
    use DoseStatus::{Missed, Pending, Taken};

    let statuses = [Taken, Taken, Missed, Taken, Taken, Taken, Missed, Taken, Taken, Pending];
    statuses
        .into_iter()
        .zip(1u32..)
        .map(|(status, day)| -> Result<DoseRecord, CoreError> {
            Ok(DoseRecord {
                id: RecordId::from(day),
                medication: "Losartana 50mg".to_string(),
                scheduled_for: date(6, day)?,
                status,
            })
        })
        .collect()
}

fn appointment(
    id: RecordId,
    patient: &str,
    professional: &str,
    mode: AppointmentMode,
    date: NaiveDate,
    time: &str,
    status: AppointmentStatus,
) -> Appointment {
    Appointment {
        id,
        patient_name: patient.to_string(),
        professional: professional.to_string(),
        service: "Consulta".to_string(),
        mode,
        date,
        time: time.to_string(),
        status,
    }
}

pub fn demo_appointments() -> Result<Vec<Appointment>, CoreError> {
    use AppointmentMode::{InPerson, Telemedicine};
    use AppointmentStatus::{Completed, Confirmed, NoShow};

    Ok(vec![
        appointment(1, "Maria Oliveira", "Dr. Silva", InPerson, date(7, 1)?, "09:00", Completed),
        appointment(2, "Joao Santos", "Dra. Costa", Telemedicine, date(7, 1)?, "10:30", NoShow),
        appointment(3, "Ana Pereira", "Dr. Silva", Telemedicine, date(7, 2)?, "14:00", Completed),
        appointment(4, "Carlos Lima", "Dr. Mendes", InPerson, date(7, 3)?, "15:30", Confirmed),
    ])
}
