mod tests {
    use std::collections::HashSet;

    use ridelight_compositor::topology::{LedType, LightChannel, Section, Topology};

    fn two_channel_topology() -> Topology {
        let mut topology = Topology::new();
        topology.add_channel(LightChannel {
            id: 1,
            led_count: 20,
            led_type: LedType::NeoPixelGrb,
        });
        topology.add_channel(LightChannel {
            id: 2,
            led_count: 15,
            led_type: LedType::NeoPixelGrb,
        });
        topology
    }

    #[test]
    fn test_region_spans_two_channels() {
        let mut topology = two_channel_topology();
        topology.add_region(
            "turn-left",
            &[
                Section {
                    channel: 1,
                    start: 0,
                    end: 10,
                },
                Section {
                    channel: 2,
                    start: 5,
                    end: 15,
                },
            ],
        );

        let region = topology.region("turn-left").unwrap();
        assert_eq!(region.count(), 20);
        assert_eq!(region.resolve(0), Some((1, 0)));
        assert_eq!(region.resolve(9), Some((1, 9)));
        assert_eq!(region.resolve(10), Some((2, 5)));
        assert_eq!(region.resolve(19), Some((2, 14)));
        assert_eq!(region.resolve(20), None);
    }

    #[test]
    fn test_resolution_is_a_bijection() {
        let mut topology = two_channel_topology();
        topology.add_region(
            "underglow",
            &[
                Section {
                    channel: 1,
                    start: 3,
                    end: 8,
                },
                Section {
                    channel: 1,
                    start: 12,
                    end: 20,
                },
                Section {
                    channel: 2,
                    start: 0,
                    end: 4,
                },
            ],
        );

        let region = topology.region("underglow").unwrap();
        let mut seen = HashSet::new();
        for i in 0..region.count() {
            let (channel, index) = region.resolve(i).unwrap();
            let bound = topology.channel(channel).unwrap().led_count;
            assert!(index < bound);
            assert!(seen.insert((channel, index)), "duplicate mapping for {i}");
        }
        assert_eq!(seen.len() as u32, region.count());
    }

    #[test]
    fn test_invalid_sections_are_skipped() {
        let mut topology = two_channel_topology();
        topology.add_region(
            "brake",
            &[
                Section {
                    channel: 1,
                    start: 0,
                    end: 10,
                },
                // end exceeds channel bounds
                Section {
                    channel: 2,
                    start: 0,
                    end: 99,
                },
                // unknown channel
                Section {
                    channel: 7,
                    start: 0,
                    end: 5,
                },
            ],
        );

        let region = topology.region("brake").unwrap();
        assert_eq!(region.count(), 10);
        assert_eq!(region.sections().len(), 1);
    }

    #[test]
    fn test_unknown_region_lookup() {
        let topology = two_channel_topology();
        assert!(topology.region("nope").is_none());
        assert!(!topology.contains_region("nope"));
    }
}
