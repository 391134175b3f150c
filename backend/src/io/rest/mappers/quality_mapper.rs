use shared::{QualityReading, QualityStatusResponse, RecordQualityReadingRequest};

use crate::domain::classify_reading;
use crate::domain::commands::quality::{QualityAssessment, RecordReadingCommand};
use crate::domain::models::quality::QualityReading as DomainQualityReading;

pub struct QualityMapper;

impl QualityMapper {
    pub fn to_dto(domain: DomainQualityReading) -> QualityReading {
        let status = classify_reading(&domain).status;
        QualityReading {
            id: domain.id,
            timestamp: domain.timestamp,
            residual_chlorine: domain.residual_chlorine,
            total_dissolved_solids: domain.total_dissolved_solids,
            hardness: domain.hardness,
            recorded_by: domain.recorded_by,
            notes: domain.notes,
            next_due_at: domain.next_due_at,
            status,
        }
    }

    pub fn to_dto_list(readings: Vec<DomainQualityReading>) -> Vec<QualityReading> {
        readings.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_command(request: RecordQualityReadingRequest) -> RecordReadingCommand {
        RecordReadingCommand {
            residual_chlorine: request.residual_chlorine,
            total_dissolved_solids: request.total_dissolved_solids,
            hardness: request.hardness,
            recorded_by: request.recorded_by,
            notes: request.notes,
            timestamp: request.timestamp,
        }
    }

    pub fn to_status_response(reading_id: String, assessment: QualityAssessment) -> QualityStatusResponse {
        QualityStatusResponse {
            reading_id,
            status: assessment.status,
            chlorine_ok: assessment.chlorine_ok,
            tds_ok: assessment.tds_ok,
            hardness_ok: assessment.hardness_ok,
        }
    }
}
