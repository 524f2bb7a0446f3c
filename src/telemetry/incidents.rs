//! Representative incident digest.

use serde::{Deserialize, Serialize};

/// Condensed incident ticket standing in for a real ticketing backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentDigest {
    pub ticket_id: String,
    pub title: String,
    pub severity: String,
    pub affected_systems: Vec<String>,
    pub narrative: String,
}

/// Return the canonical demo incident. The shape is fixed by the struct;
/// the content is fixed too so transcripts stay reproducible.
pub fn fetch_incident_digest() -> IncidentDigest {
    IncidentDigest {
        ticket_id: "INC-4092".to_string(),
        title: "Elevated checkout errors after database disk pressure".to_string(),
        severity: "SEV-2".to_string(),
        affected_systems: vec![
            "prod-app-01".to_string(),
            "prod-db-02".to_string(),
            "payments-gateway".to_string(),
        ],
        narrative: "Disk usage on the primary database volume crossed 90% at \
                    t-7h, pushing query latency past the checkout timeout. \
                    Error rate on /api/checkout peaked at 4.2% before the \
                    on-call rotated WAL segments and expanded the volume. \
                    Residual risk: autovacuum backlog on prod-db-02 and no \
                    alert on volume growth rate."
            .to_string(),
    }
}
