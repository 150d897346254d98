mod tests {
    use embassy_time::Instant;

    use ridelight_compositor::color::Rgb;
    use ridelight_compositor::{
        ChannelConfig, CommandListenerQueue, Compositor, CompositorConfig, ConfigSlot, FlushError,
        LightingParameters, PixelDriver, RegionConfig, SectionConfig, SignalQueues,
    };

    const SENTINEL: Rgb = Rgb { r: 9, g: 9, b: 9 };
    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    struct FakeDriver {
        pixels: Vec<Rgb>,
    }

    impl FakeDriver {
        fn new(count: u16) -> Self {
            Self {
                pixels: vec![SENTINEL; count as usize],
            }
        }

        fn lit_positions(&self, color: Rgb) -> Vec<usize> {
            self.pixels
                .iter()
                .enumerate()
                .filter(|(_, c)| **c == color)
                .map(|(i, _)| i)
                .collect()
        }
    }

    impl PixelDriver for FakeDriver {
        fn set_pixel(&mut self, _channel: u8, index: u16, color: Rgb) {
            self.pixels[index as usize] = color;
        }

        fn mark_dirty(&mut self, _channel: u8) {}

        fn mark_all_dirty(&mut self) {}

        fn flush(&mut self) -> Result<(), FlushError> {
            Ok(())
        }
    }

    /// Harness holding the queue statics a compositor borrows from.
    struct Rig {
        signals: SignalQueues,
        reload: ConfigSlot,
        listeners: CommandListenerQueue,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                signals: SignalQueues::new(),
                reload: ConfigSlot::new(),
                listeners: CommandListenerQueue::new(),
            }
        }

        fn compositor(&self, count: u16) -> Compositor<'_, FakeDriver> {
            let config = CompositorConfig::load(
                &[ChannelConfig {
                    channel: 1,
                    led_count: count,
                    led_type: 0,
                }],
                &[RegionConfig {
                    name: "strip",
                    sections: &[SectionConfig {
                        channel: 1,
                        start: 0,
                        end: count,
                    }],
                }],
                &[],
            );
            Compositor::new(FakeDriver::new(count), config, &self.signals, &self.reload, &self.listeners, 42)
        }
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn apply(comp: &mut Compositor<'_, FakeDriver>, literal: &str) {
        let params = LightingParameters::parse("strip", literal).unwrap();
        comp.apply_effect(params, at(0));
        comp.tick(at(0));
    }

    /// Run the next due frame for the strip.
    fn advance(comp: &mut Compositor<'_, FakeDriver>) {
        let next = comp.step("strip").unwrap().next.expect("effect went idle");
        comp.tick(next);
    }

    #[test]
    fn test_blink_alternates_both_colors() {
        let rig = Rig::new();
        let mut comp = rig.compositor(6);
        apply(&mut comp, "3,#ff0000,#0000ff,200");

        assert!(comp.driver().pixels.iter().all(|c| *c == RED));
        assert_eq!(comp.step("strip").unwrap().next, Some(at(200)));

        advance(&mut comp);
        assert!(comp.driver().pixels.iter().all(|c| *c == BLUE));

        advance(&mut comp);
        assert!(comp.driver().pixels.iter().all(|c| *c == RED));
    }

    #[test]
    fn test_alternate_flips_the_checkerboard() {
        let rig = Rig::new();
        let mut comp = rig.compositor(6);
        apply(&mut comp, "4,#ff0000,#0000ff,100");

        assert_eq!(comp.driver().lit_positions(RED), vec![0, 2, 4]);
        assert_eq!(comp.driver().lit_positions(BLUE), vec![1, 3, 5]);

        advance(&mut comp);
        assert_eq!(comp.driver().lit_positions(RED), vec![1, 3, 5]);
        assert_eq!(comp.driver().lit_positions(BLUE), vec![0, 2, 4]);
    }

    #[test]
    fn test_color_wipe_sweeps_then_idles() {
        let rig = Rig::new();
        let mut comp = rig.compositor(6);
        apply(&mut comp, "5,#ff0000,#0000ff,120");

        assert_eq!(comp.driver().lit_positions(RED), vec![0]);
        assert_eq!(comp.step("strip").unwrap().next, Some(at(10)));

        while comp.step("strip").unwrap().next.is_some() {
            advance(&mut comp);
        }

        assert!(comp.driver().pixels.iter().all(|c| *c == BLUE));
        assert_eq!(comp.step("strip").unwrap().step, 12);
    }

    #[test]
    fn test_scan_ping_pongs_at_boundaries() {
        let rig = Rig::new();
        let mut comp = rig.compositor(3);
        apply(&mut comp, "8,#ff0000,#0000ff,60");

        let mut positions = vec![comp.driver().lit_positions(RED)[0]];
        for _ in 0..5 {
            advance(&mut comp);
            let lit = comp.driver().lit_positions(RED);
            assert_eq!(lit.len(), 1);
            positions.push(lit[0]);
        }
        assert_eq!(positions, vec![0, 1, 2, 1, 0, 1]);
    }

    #[test]
    fn test_rainbow_walks_the_wheel() {
        let rig = Rig::new();
        let mut comp = rig.compositor(4);
        apply(&mut comp, "9,2560");

        assert!(comp.driver().pixels.iter().all(|c| *c == GREEN));

        while comp.step("strip").unwrap().step < 86 {
            advance(&mut comp);
        }
        assert!(comp.driver().pixels.iter().all(|c| *c == RED));
    }

    #[test]
    fn test_rainbow_cycle_paints_a_gradient() {
        let rig = Rig::new();
        let mut comp = rig.compositor(4);
        apply(&mut comp, "10,2560");

        let first = comp.driver().pixels[0];
        assert!(comp.driver().pixels.iter().any(|c| *c != first));
    }

    #[test]
    fn test_theater_chase_marquee() {
        let rig = Rig::new();
        let mut comp = rig.compositor(6);
        apply(&mut comp, "12,#ff0000,#000000,50");

        assert_eq!(comp.driver().lit_positions(RED), vec![0, 3]);

        advance(&mut comp);
        assert_eq!(comp.driver().lit_positions(RED), vec![2, 5]);

        advance(&mut comp);
        assert_eq!(comp.driver().lit_positions(RED), vec![1, 4]);
    }

    #[test]
    fn test_color_chase_rotates_the_palette() {
        let rig = Rig::new();
        let mut comp = rig.compositor(6);
        apply(&mut comp, "11,#ff0000,#00ff00,#0000ff,300");

        assert_eq!(comp.driver().lit_positions(RED), vec![0, 3]);
        assert_eq!(comp.driver().lit_positions(GREEN), vec![1, 4]);
        assert_eq!(comp.driver().lit_positions(BLUE), vec![2, 5]);
        assert_eq!(comp.step("strip").unwrap().next, Some(at(100)));

        advance(&mut comp);
        assert_eq!(comp.driver().lit_positions(RED), vec![2, 5]);
    }

    #[test]
    fn test_sparkle_restores_the_previous_pixel() {
        let rig = Rig::new();
        let mut comp = rig.compositor(8);
        apply(&mut comp, "15,#ff0000,#0000ff,800");

        for _ in 0..10 {
            let lit = comp.driver().lit_positions(RED);
            assert_eq!(lit.len(), 1, "exactly one sparkle at a time");
            assert_eq!(comp.driver().lit_positions(BLUE).len(), 7);
            advance(&mut comp);
        }
    }

    #[test]
    fn test_twinkle_extinguishes_then_resets() {
        let rig = Rig::new();
        let mut comp = rig.compositor(8);
        apply(&mut comp, "14,#000000,#00ff00,800");

        // countdown is seeded from count/4, so at most 3 pixels go dark
        // before the field relights
        for _ in 0..20 {
            let dark = comp.driver().lit_positions(BLACK).len();
            assert!((1..=3).contains(&dark));
            advance(&mut comp);
        }
    }

    #[test]
    fn test_breathe_dwells_at_the_extremes() {
        let rig = Rig::new();
        let mut comp = rig.compositor(4);
        apply(&mut comp, "6,#ff0000,#000000,5120");

        // level 0 renders the second color with the longest dwell
        assert!(comp.driver().pixels.iter().all(|c| *c == BLACK));
        assert_eq!(comp.step("strip").unwrap().next, Some(at(80)));
    }

    #[test]
    fn test_fade_starts_from_the_first_color() {
        let rig = Rig::new();
        let mut comp = rig.compositor(4);
        apply(&mut comp, "7,#ff0000,#000000,1280");

        assert!(comp.driver().pixels.iter().all(|c| *c == RED));
        let step = comp.step("strip").unwrap();
        assert_eq!(step.step, 4);
        assert_eq!(step.next, Some(at(10)));
    }

    #[test]
    fn test_transparent_writes_nothing() {
        let rig = Rig::new();
        let mut comp = rig.compositor(4);
        apply(&mut comp, "0");

        assert!(comp.driver().pixels.iter().all(|c| *c == SENTINEL));
        assert_eq!(comp.step("strip").unwrap().next, None);
    }
}
