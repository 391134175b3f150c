use shared::{
    AgendaEntry, CompleteMaintenanceRequest, MaintenanceDefinition, MaintenanceLogEntry,
    MaintenanceStep,
};

use crate::domain::commands::maintenance::{AgendaItem, CompleteMaintenanceCommand};
use crate::domain::models::maintenance::{
    MaintenanceDefinition as DomainMaintenanceDefinition,
    MaintenanceLogEntry as DomainMaintenanceLogEntry, MaintenanceStep as DomainMaintenanceStep,
};

pub struct MaintenanceMapper;

impl MaintenanceMapper {
    fn step_to_dto(step: DomainMaintenanceStep) -> MaintenanceStep {
        MaintenanceStep {
            number: step.number,
            description: step.description,
            warning: step.warning,
            completed: step.completed,
        }
    }

    pub fn definition_to_dto(domain: DomainMaintenanceDefinition) -> MaintenanceDefinition {
        MaintenanceDefinition {
            id: domain.id,
            name: domain.name,
            description: domain.description,
            category: domain.category,
            frequency: domain.frequency,
            estimated_minutes: domain.estimated_minutes,
            required_materials: domain.required_materials,
            steps: domain.steps.into_iter().map(Self::step_to_dto).collect(),
        }
    }

    pub fn catalog_to_dto(catalog: Vec<DomainMaintenanceDefinition>) -> Vec<MaintenanceDefinition> {
        catalog.into_iter().map(Self::definition_to_dto).collect()
    }

    pub fn log_to_dto(domain: DomainMaintenanceLogEntry) -> MaintenanceLogEntry {
        MaintenanceLogEntry {
            id: domain.id,
            maintenance_definition_id: domain.maintenance_definition_id,
            performed_at: domain.performed_at,
            performed_by: domain.performed_by,
            notes: domain.notes,
            next_due_at: domain.next_due_at,
            duration_minutes: domain.duration_minutes,
        }
    }

    pub fn logs_to_dto(logs: Vec<DomainMaintenanceLogEntry>) -> Vec<MaintenanceLogEntry> {
        logs.into_iter().map(Self::log_to_dto).collect()
    }

    pub fn agenda_to_dto(items: Vec<AgendaItem>) -> Vec<AgendaEntry> {
        items
            .into_iter()
            .map(|item| AgendaEntry {
                log_id: item.log_id,
                maintenance_definition_id: item.maintenance_definition_id,
                maintenance_name: item.maintenance_name,
                next_due_at: item.next_due_at,
            })
            .collect()
    }

    pub fn to_complete_command(request: CompleteMaintenanceRequest) -> CompleteMaintenanceCommand {
        CompleteMaintenanceCommand {
            maintenance_definition_id: request.maintenance_definition_id,
            performed_by: request.performed_by,
            duration_minutes: request.duration_minutes,
            notes: request.notes,
            performed_at: request.performed_at,
        }
    }
}
