mod tests {
    use ridelight_compositor::action::{Action, ActionTable, CommandGroup, TravelDirection};
    use ridelight_compositor::params::{EffectShape, LightingParameters};
    use ridelight_compositor::signal::{PowerLevel, PowerStatus, UpdateStatus};
    use ridelight_compositor::status;

    fn binding(region: &str, literal: &str) -> LightingParameters {
        LightingParameters::parse(region, literal).unwrap()
    }

    #[test]
    fn test_direction_override_wins_over_bare_name() {
        let mut table = ActionTable::new();
        table
            .insert("turn-left", binding("left", "3,#ffff00,#000000,300"))
            .unwrap();
        table
            .insert("turn-left-backward", binding("right", "3,#ffff00,#000000,300"))
            .unwrap();

        let forward = table
            .resolve(Action::TurnLeft, TravelDirection::Forward)
            .unwrap();
        assert_eq!(forward[0].region.as_str(), "left");

        let backward = table
            .resolve(Action::TurnLeft, TravelDirection::Backward)
            .unwrap();
        assert_eq!(backward[0].region.as_str(), "right");
    }

    #[test]
    fn test_bare_name_is_the_fallback() {
        let mut table = ActionTable::new();
        table
            .insert("motion-brakes", binding("brake", "3,#ff0000,#000000,200"))
            .unwrap();

        for direction in [TravelDirection::Forward, TravelDirection::Backward] {
            let bindings = table.resolve(Action::MotionBrakes, direction).unwrap();
            assert_eq!(bindings.len(), 1);
            assert_eq!(bindings[0].shape, EffectShape::Blink);
        }
        assert!(table.resolve(Action::TurnHazard, TravelDirection::Forward).is_none());
    }

    #[test]
    fn test_multiple_bindings_per_action() {
        let mut table = ActionTable::new();
        table
            .insert("turn-hazard", binding("left", "3,#ffff00,#000000,300"))
            .unwrap();
        table
            .insert("turn-hazard", binding("right", "3,#ffff00,#000000,300"))
            .unwrap();

        let bindings = table
            .resolve(Action::TurnHazard, TravelDirection::Forward)
            .unwrap();
        assert_eq!(bindings.len(), 2);
    }

    #[test]
    fn test_action_groups() {
        assert_eq!(Action::MotionBrakes.group(), Some(CommandGroup::Motion));
        assert_eq!(Action::HeadlightBright.group(), Some(CommandGroup::Headlight));
        assert_eq!(Action::TurnHazard.group(), Some(CommandGroup::Turn));
        assert_eq!(Action::Reset.group(), None);
        assert_eq!(Action::BatteryLow.group(), None);
    }

    #[test]
    fn test_power_status_policy() {
        let charging = PowerStatus {
            charging: true,
            battery_present: true,
            percentage: 40,
            level: PowerLevel::Normal,
        };
        let params = status::power_status(&charging);
        assert_eq!(params.region.as_str(), status::STATUS_REGION);
        assert_eq!(params.shape, EffectShape::Static);

        let critical = PowerStatus {
            charging: false,
            battery_present: true,
            percentage: 2,
            level: PowerLevel::Critical,
        };
        assert_ne!(status::power_status(&critical).first, params.first);
    }

    #[test]
    fn test_update_status_policy() {
        assert_eq!(
            status::update_status(UpdateStatus::Write).unwrap().shape,
            EffectShape::Blink,
        );
        assert_eq!(
            status::update_status(UpdateStatus::Start).unwrap().shape,
            EffectShape::Static,
        );
        assert!(status::update_status(UpdateStatus::End).is_none());
    }
}
