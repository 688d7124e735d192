use crate::models::DeliveryRecord;
use crate::plan::{delivered, remaining};

const BOM: char = '\u{feff}';
const HEADER: [&str; 6] = [
    "Fecha",
    "Cliente",
    "Planificados",
    "Entregados",
    "Pendientes",
    "Notas",
];

pub fn export_csv(date: &str, list: &[DeliveryRecord]) -> String {
    let mut lines = Vec::with_capacity(list.len() + 1);
    lines.push(HEADER.join(","));
    for record in list {
        lines.push(
            [
                date.to_string(),
                escape_field(&record.client),
                record.planned.to_string(),
                delivered(record).to_string(),
                remaining(record).to_string(),
                escape_field(&record.notes),
            ]
            .join(","),
        );
    }

    let mut csv = String::from(BOM);
    csv.push_str(&lines.join("\n"));
    csv
}

pub fn export_filename(date: &str) -> String {
    format!("plan-fletes_{date}.csv")
}

fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
