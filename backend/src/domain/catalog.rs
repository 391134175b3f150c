//! Seed maintenance catalog of a purification station.
//!
//! The catalog is static: definitions are never created or deleted at
//! runtime. Only the per-run step flags change.

use shared::{FrequencyClass, MaintenanceCategory};

use super::models::maintenance::{MaintenanceDefinition, MaintenanceStep};

#[allow(clippy::too_many_arguments)]
fn definition(
    id: &str,
    name: &str,
    description: &str,
    category: MaintenanceCategory,
    frequency: FrequencyClass,
    estimated_minutes: u32,
    required_materials: &[&str],
    steps: Vec<MaintenanceStep>,
) -> MaintenanceDefinition {
    MaintenanceDefinition {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        frequency,
        estimated_minutes,
        required_materials: required_materials.iter().map(|m| m.to_string()).collect(),
        steps,
    }
}

fn steps(descriptions: &[&str]) -> Vec<MaintenanceStep> {
    descriptions
        .iter()
        .enumerate()
        .map(|(index, description)| MaintenanceStep::new(index as u32 + 1, description))
        .collect()
}

/// The ten maintenance routines of the station, in display order
pub fn seed_catalog() -> Vec<MaintenanceDefinition> {
    let mut chlorine_steps = steps(&[
        "Open the carbon filter sampling valve and let water run for 30 seconds",
        "Add four drops of yellow solution and four drops of red solution",
        "Cap the vials and shake hard until the colour is even",
        "After a few seconds compare the tone against the colour scale",
        "Check that chlorine in water drawn from the filling nozzle reads zero",
    ]);
    chlorine_steps[4] = chlorine_steps[4]
        .clone()
        .with_warning("If the reading is above 0, backwash the carbon filter");

    let mut media_steps = steps(&[
        "Depressurise the line by unplugging the pump and turn the filter lever to \"Fast Rinse\"",
        "Unscrew the union nuts of the filter",
        "Unscrew the filter head counter-clockwise",
        "Tilt the filter until it lies horizontally",
        "With the filter horizontal, pull out the diffuser tube",
        "Once the old media is out, stand the filter upright again",
        "Rinse the diffuser tube and the inside of the filter with water",
        "Insert the diffuser end into the tank",
        "Put a funnel in the filter mouth and pour in the new media charge",
        "Refit the head and tighten the union nuts",
    ]);
    media_steps[8] = media_steps[8]
        .clone()
        .with_warning("Keep the media out of the diffuser tube");

    vec![
        definition(
            "1",
            "Chlorine and pH Measurement",
            "Measure the water quality parameters",
            MaintenanceCategory::Measurement,
            FrequencyClass::Daily,
            10,
            &["Test kit", "Yellow solution", "Red solution"],
            chlorine_steps,
        ),
        definition(
            "2",
            "Dual Filter Backwash (Sand and Carbon)",
            "Clean the dual filter by backwashing",
            MaintenanceCategory::Filters,
            FrequencyClass::Weekly,
            10,
            &[],
            steps(&[
                "Turn the lever to \"Back Wash\" and hold that position for 5 minutes",
                "Turn the lever to \"Fast Rinse\" and hold that position for 1 minute",
                "Return the lever to the starting \"Filter\" position",
            ]),
        ),
        definition(
            "3",
            "Filter Media Change",
            "Replace the sand and activated carbon of the dual filter",
            MaintenanceCategory::Filters,
            FrequencyClass::Yearly,
            90,
            &["Filter sand", "Activated carbon", "Funnel"],
            media_steps,
        ),
        definition(
            "4",
            "Polishing Filter Cleaning",
            "Wash the 1 to 5 micron polishing filters",
            MaintenanceCategory::Filters,
            FrequencyClass::Weekly,
            30,
            &["Bucket", "Purified water", "Chlorine"],
            steps(&[
                "Switch off the main pump and open the hardness sampling valve",
                "Place a bucket under the polishing filter to catch spills",
                "Slide the racket-shaped wrench under the filter housing",
                "Support the filter with one hand under its base",
                "Remove the housing gasket and keep it safe",
                "With the housing off, carefully take out the cartridge",
                "Add 20 drops of chlorine and soak the cartridge for 15 to 20 minutes",
                "Rinse thoroughly with purified water",
                "Lubricate the gaskets with glycerine or petroleum jelly",
            ]),
        ),
        definition(
            "5",
            "Softener Regeneration",
            "Regenerate the cation resin of the softener",
            MaintenanceCategory::Filters,
            FrequencyClass::Variable,
            60,
            &["Industrial salt", "Hardness test kit"],
            steps(&[
                "Open the softener sampling valve and let water run for 30 seconds",
                "Fill the hardness kit vial up to the gauge line",
                "Add two drops of solution number 6",
                "Blue means no hardness; purple or red means the water is hard",
            ]),
        ),
        definition(
            "6",
            "Pipe Washing and Disinfection",
            "Chlorinate the product water line to the dispensers",
            MaintenanceCategory::Disinfection,
            FrequencyClass::Monthly,
            60,
            &["Household bleach"],
            steps(&[
                "Fill the product tank with 250 litres of water and add 150 mL of bleach",
                "Open the filling solenoid valve by hand, turning the coil to ON",
                "Close the solenoid valve once chlorine can be smelled at the filling nozzle",
                "Open the rinse solenoid valve by hand so water flows through the rinse line",
                "Let the chlorinated line rest for 8 to 12 hours",
                "Refill the tank with filtered water and open the rinse and filling valves again",
            ]),
        ),
        definition(
            "7",
            "Tank Washing and Disinfection",
            "Clean the inside of the product water tank",
            MaintenanceCategory::Cleaning,
            FrequencyClass::Monthly,
            45,
            &["Germicide", "Microfibre cloth"],
            steps(&[
                "Scrub every inner wall of the tank with germicide and a microfibre cloth",
                "Rinse with plenty of water and drain what collects in the tank",
                "Dry with a lint-free microfibre cloth",
                "Check the chlorine level of the raw water tank",
            ]),
        ),
        definition(
            "8",
            "UV Lamp Change",
            "Replace the ultraviolet lamp",
            MaintenanceCategory::Disinfection,
            FrequencyClass::Yearly,
            30,
            &["New UV lamp"],
            steps(&[
                "Unplug the lamp from its power supply",
                "Carefully remove the black end cap",
                "Note how the lamp is connected",
                "Separate the connector from the lamp filaments",
                "Slide the lamp out of the stainless steel housing",
                "Disconnect the filaments at both ends",
                "Fit the new lamp the same way the old one came out",
            ]),
        ),
        definition(
            "9",
            "Quartz Sleeve Cleaning",
            "Clean the quartz sleeve around the UV lamp",
            MaintenanceCategory::Cleaning,
            FrequencyClass::Yearly,
            30,
            &["Microfibre cloth"],
            steps(&[
                "Unplug the UV lamp and the pressure pump",
                "Depressurise the line by turning the solenoid coil to ON",
                "Carefully remove the black end cap",
                "Pull out the UV lamp and disconnect it from the ballast",
                "Remove the threaded caps of the lamp housing",
                "Remove the gaskets holding the quartz sleeve and take it out",
                "Wipe the quartz sleeve clean with a microfibre cloth",
                "Refit every part removed",
            ]),
        ),
        definition(
            "10",
            "Solenoid Valve Service",
            "Clean and check the solenoid valve",
            MaintenanceCategory::Valves,
            FrequencyClass::Variable,
            45,
            &["Screwdriver", "3/16\" socket", "Purified water"],
            steps(&[
                "Disconnect the equipment from mains power",
                "Close the product tank stop valve and depressurise the line",
                "Undo the valve cover screws with a ratchet and 3/16\" socket",
                "Wash every removed part with purified water",
                "Seat the diaphragm base and the diaphragm in the right position",
                "Stretch the spring with moderate force to a height of 2.5 to 3 cm",
                "Fit the spring in place, then the cover",
                "Turn the coil to OFF to close the solenoid valve",
            ]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_are_unique_and_steps_numbered() {
        let catalog = seed_catalog();
        assert_eq!(catalog.len(), 10);

        let ids: HashSet<_> = catalog.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());

        for definition in &catalog {
            for (index, step) in definition.steps.iter().enumerate() {
                assert_eq!(step.number, index as u32 + 1, "{}", definition.name);
                assert!(!step.completed);
            }
        }
    }

    #[test]
    fn test_warnings_are_attached_to_the_right_steps() {
        let catalog = seed_catalog();
        assert!(catalog[0].steps[4].warning.is_some());
        assert!(catalog[2].steps[8].warning.is_some());
        assert_eq!(
            catalog.iter().flat_map(|d| &d.steps).filter(|s| s.warning.is_some()).count(),
            2
        );
    }
}
