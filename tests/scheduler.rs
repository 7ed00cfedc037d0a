mod tests {
    use myrtio_light_orbit::{
        ActivationPolicy, AnimationError, ConfigError, Duration, InputSnapshot, PathGeometry,
        RenderingBounds, Rgb, RingConfig, SchedulerConfig, SegmentConfig, SegmentScheduler,
        activation::progressive_unlock,
        animate_path,
        color::BLACK,
        config::{FIRST_SEGMENT_SENSORS, FOLLOWING_SEGMENT_SENSORS},
        rainbow,
    };

    const LEDS: usize = 28;

    fn scheduler(policy: ActivationPolicy) -> SegmentScheduler<'static, LEDS> {
        SegmentScheduler::new(&SchedulerConfig::four_segments(policy).unwrap()).unwrap()
    }

    fn sensors(index: usize) -> &'static [f64] {
        if index == 0 {
            &FIRST_SEGMENT_SENSORS
        } else {
            &FOLLOWING_SEGMENT_SENSORS
        }
    }

    /// What segment `index` shows when it is active
    fn expected<const N: usize>(scheduler: &SegmentScheduler<'_, N>, index: usize) -> [Rgb; 7] {
        let state = scheduler.segment_state(index).unwrap();
        let mut leds = [BLACK; 7];
        animate_path(
            scheduler.geometry(),
            sensors(index),
            state.elapsed,
            rainbow(state.phase),
            &mut leds,
        )
        .unwrap();
        leds
    }

    fn segment(frame: &[Rgb], index: usize) -> &[Rgb] {
        &frame[index * 7..index * 7 + 7]
    }

    fn all_buttons() -> InputSnapshot {
        InputSnapshot::from_buttons(&[true; 4])
    }

    #[test]
    fn test_four_segment_layout() {
        let scheduler = scheduler(ActivationPolicy::ProgressiveUnlock);
        assert_eq!(scheduler.led_count(), 28);
        assert_eq!(scheduler.segment_count(), 4);
        assert_eq!(scheduler.cycle(), 0);
        assert_eq!(scheduler.interval(), Duration::from_millis(30));
        assert_eq!(scheduler.ring_phase(), None);
        for (index, phase) in [0.0, 64.0, 128.0, 192.0].into_iter().enumerate() {
            let state = scheduler.segment_state(index).unwrap();
            assert_eq!(state.phase, phase);
            assert_eq!(state.elapsed, 0.0);
        }
        assert!(scheduler.segment_state(4).is_none());
    }

    #[test]
    fn test_progressive_unlock_starts_with_first_segment() {
        let mut scheduler = scheduler(ActivationPolicy::ProgressiveUnlock);
        let frame = scheduler.render(&InputSnapshot::default()).unwrap().to_vec();

        assert_eq!(frame.len(), LEDS);
        assert_eq!(frame[0], Rgb::new(0, 51, 0));
        assert_eq!(segment(&frame, 0), expected(&scheduler, 0));
        for index in 1..4 {
            // Each of these would light its fourth LED if it were active.
            assert_ne!(expected(&scheduler, index)[3], BLACK);
            assert_eq!(segment(&frame, index), [BLACK; 7]);
        }
    }

    #[test]
    fn test_progressive_unlock_across_cycles() {
        let mut scheduler = scheduler(ActivationPolicy::ProgressiveUnlock);
        let mut gated_dark = 0;
        let mut gated_lit = 0;
        let mut fully_lit = 0;
        let mut wrapped_to_zero = false;

        for _ in 0..400 {
            let frame = scheduler.render(&InputSnapshot::default()).unwrap().to_vec();
            let cycle = scheduler.cycle();

            for index in 0..4 {
                let state = scheduler.segment_state(index).unwrap();
                let reach = 1.5 + state.elapsed * 24.0;
                if progressive_unlock(index, cycle, reach, sensors(index)[0]) {
                    assert_eq!(segment(&frame, index), expected(&scheduler, index));
                } else {
                    assert_eq!(segment(&frame, index), [BLACK; 7]);
                }
            }

            if cycle == 1 {
                let reach = 1.5 + scheduler.segment_state(1).unwrap().elapsed * 24.0;
                if reach < 21.0 {
                    gated_dark += 1;
                } else {
                    gated_lit += 1;
                }
            }
            if cycle >= 4 {
                fully_lit += 1;
            }

            if scheduler.advance() && scheduler.cycle() == 0 {
                wrapped_to_zero = true;
            }
        }

        assert!(gated_dark > 0);
        assert!(gated_lit > 0);
        assert!(fully_lit > 0);
        assert!(wrapped_to_zero);
    }

    #[test]
    fn test_cycle_wraps_after_seven_periods() {
        let mut scheduler = scheduler(ActivationPolicy::ProgressiveUnlock);
        let mut wraps: u32 = 0;
        let mut ticks = 0;
        while wraps < 15 {
            ticks += 1;
            if scheduler.advance() {
                wraps += 1;
                assert_eq!(u32::from(scheduler.cycle()), wraps % 7);
            }
        }
        // 1.25 s periods at 30 ms per tick
        assert!((ticks as f64 - 15.0 * 1.25 / 0.03).abs() < 2.0);
    }

    #[test]
    fn test_first_wrap_after_one_period() {
        let mut scheduler = scheduler(ActivationPolicy::ProgressiveUnlock);
        for _ in 0..41 {
            assert!(!scheduler.advance());
        }
        assert!(scheduler.advance());
        assert_eq!(scheduler.cycle(), 1);
        let elapsed = scheduler.segment_state(0).unwrap().elapsed;
        assert!((elapsed - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_advance_steps_every_segment() {
        let mut scheduler = scheduler(ActivationPolicy::ProgressiveUnlock);
        scheduler.advance();
        for (index, phase) in [1.0, 65.0, 129.0, 193.0].into_iter().enumerate() {
            let state = scheduler.segment_state(index).unwrap();
            assert_eq!(state.phase, phase);
            assert!((state.elapsed - 0.03).abs() < 1e-12);
        }

        for _ in 0..255 {
            scheduler.advance();
        }
        for (index, phase) in [0.0, 64.0, 128.0, 192.0].into_iter().enumerate() {
            assert_eq!(scheduler.segment_state(index).unwrap().phase, phase);
        }
    }

    #[test]
    fn test_custom_interval() {
        let config = SchedulerConfig::four_segments(ActivationPolicy::ProgressiveUnlock)
            .unwrap()
            .with_interval(Duration::from_millis(125));
        let mut scheduler = SegmentScheduler::<LEDS>::new(&config).unwrap();
        for _ in 0..10 {
            assert!(!scheduler.advance());
        }
        assert_eq!(scheduler.segment_state(0).unwrap().elapsed, 1.25);
        assert!(scheduler.advance());
        assert_eq!(scheduler.segment_state(0).unwrap().elapsed, 0.125);
    }

    #[test]
    fn test_input_gated_chain() {
        let mut scheduler = scheduler(ActivationPolicy::InputGated);

        let inputs = InputSnapshot::from_buttons(&[true, false, true, true]);
        let frame = scheduler.render(&inputs).unwrap().to_vec();
        assert_eq!(segment(&frame, 0), expected(&scheduler, 0));
        for index in 1..4 {
            assert_eq!(segment(&frame, index), [BLACK; 7]);
        }

        let inputs = InputSnapshot::from_buttons(&[true, true, false, true]);
        let frame = scheduler.render(&inputs).unwrap().to_vec();
        assert_eq!(segment(&frame, 1), expected(&scheduler, 1));
        assert_eq!(frame[10], rainbow(64.0));
        assert_eq!(segment(&frame, 2), [BLACK; 7]);
        assert_eq!(segment(&frame, 3), [BLACK; 7]);

        let frame = scheduler.render(&InputSnapshot::default()).unwrap().to_vec();
        assert_eq!(frame, vec![BLACK; LEDS]);
    }

    #[test]
    fn test_input_gated_override() {
        let mut scheduler = scheduler(ActivationPolicy::InputGated);
        let inputs = InputSnapshot {
            override_all: true,
            ..InputSnapshot::default()
        };
        let frame = scheduler.render(&inputs).unwrap().to_vec();
        for index in 0..4 {
            assert_ne!(expected(&scheduler, index), [BLACK; 7]);
            assert_eq!(segment(&frame, index), expected(&scheduler, index));
        }
    }

    #[test]
    fn test_progressive_unlock_ignores_buttons() {
        let mut scheduler = scheduler(ActivationPolicy::ProgressiveUnlock);
        let inputs = InputSnapshot {
            override_all: true,
            ..all_buttons()
        };
        let frame = scheduler.render(&inputs).unwrap().to_vec();
        assert_eq!(segment(&frame, 1), [BLACK; 7]);
    }

    #[test]
    fn test_blackout() {
        for policy in [ActivationPolicy::ProgressiveUnlock, ActivationPolicy::InputGated] {
            let mut scheduler = scheduler(policy);
            let inputs = InputSnapshot {
                override_all: true,
                blackout: true,
                ..all_buttons()
            };
            let frame = scheduler.render(&inputs).unwrap().to_vec();
            assert_eq!(frame, vec![BLACK; LEDS]);
        }
    }

    fn ring_scheduler(policy: ActivationPolicy) -> SegmentScheduler<'static, 40> {
        let config = SchedulerConfig::four_segments(policy)
            .unwrap()
            .with_ring(RingConfig {
                bounds: RenderingBounds::from_offset(28, 12),
                phase: 0.0,
            });
        SegmentScheduler::new(&config).unwrap()
    }

    #[test]
    fn test_ring_lit_when_all_segments_active() {
        let mut scheduler = ring_scheduler(ActivationPolicy::InputGated);
        assert_eq!(scheduler.led_count(), 40);
        assert_eq!(scheduler.ring_phase(), Some(0.0));

        let frame = scheduler.render(&all_buttons()).unwrap().to_vec();
        for (index, led) in frame[28..].iter().enumerate() {
            let phase = ((index as f64 * 256.0 / 12.0) % 256.0).floor();
            assert_eq!(*led, rainbow(phase));
        }

        let frame = scheduler
            .render(&InputSnapshot::from_buttons(&[true, true, true, false]))
            .unwrap()
            .to_vec();
        assert_eq!(&frame[28..], &[BLACK; 12]);

        scheduler.advance();
        assert_eq!(scheduler.ring_phase(), Some(1.0));
        let frame = scheduler.render(&all_buttons()).unwrap().to_vec();
        assert_eq!(frame[28], rainbow(1.0));
    }

    #[test]
    fn test_ring_follows_progressive_unlock() {
        let mut scheduler = ring_scheduler(ActivationPolicy::ProgressiveUnlock);
        let frame = scheduler.render(&all_buttons()).unwrap().to_vec();
        assert_eq!(&frame[28..], &[BLACK; 12]);

        while scheduler.cycle() < 4 {
            scheduler.advance();
        }
        let frame = scheduler.render(&InputSnapshot::default()).unwrap().to_vec();
        assert_ne!(&frame[28..], &[BLACK; 12]);
    }

    fn geometry() -> PathGeometry {
        PathGeometry::new(30.0, 24.0, 7.0, 1.5).unwrap()
    }

    fn config_error<const N: usize>(config: &SchedulerConfig<'_>) -> Option<AnimationError> {
        SegmentScheduler::<N>::new(config).err()
    }

    #[test]
    fn test_config_errors() {
        let single = |sensors: &'static [f64], count: u8| SegmentConfig {
            sensors,
            bounds: RenderingBounds::from_offset(0, count),
            phase: 0.0,
        };

        let config = SchedulerConfig::new(geometry())
            .with_segment(single(&[0.0, 30.0], 2))
            .unwrap();
        assert_eq!(
            config_error::<8>(&config),
            Some(AnimationError::Config(ConfigError::SensorOutOfPath))
        );

        let config = SchedulerConfig::new(geometry())
            .with_segment(single(&[0.0, 3.0], 1))
            .unwrap();
        assert_eq!(
            config_error::<8>(&config),
            Some(AnimationError::Config(ConfigError::TooManySensors))
        );

        assert_eq!(
            config_error::<8>(&SchedulerConfig::new(geometry())),
            Some(AnimationError::Config(ConfigError::NoSegments))
        );

        let config = SchedulerConfig::four_segments(ActivationPolicy::InputGated).unwrap();
        assert_eq!(
            config_error::<20>(&config),
            Some(AnimationError::Config(ConfigError::BoundsOutOfFrame))
        );
        assert_eq!(
            config_error::<LEDS>(&config.clone().with_ring(RingConfig {
                bounds: RenderingBounds::from_offset(28, 12),
                phase: 0.0,
            })),
            Some(AnimationError::Config(ConfigError::BoundsOutOfFrame))
        );
        assert_eq!(
            config_error::<LEDS>(&config.clone().with_interval(Duration::from_millis(0))),
            Some(AnimationError::Config(ConfigError::ZeroInterval))
        );
        assert_eq!(
            config_error::<LEDS>(&config.with_cycles(0)),
            Some(AnimationError::Config(ConfigError::ZeroCycles))
        );

        let mut config = SchedulerConfig::new(geometry());
        for _ in 0..8 {
            config = config.with_segment(single(&[0.0], 1)).unwrap();
        }
        assert_eq!(
            config.with_segment(single(&[0.0], 1)).err(),
            Some(AnimationError::Config(ConfigError::TooManySegments))
        );
    }

    #[test]
    fn test_initial_phase_out_of_range() {
        let segment = |phase: f64| SegmentConfig {
            sensors: &FIRST_SEGMENT_SENSORS,
            bounds: RenderingBounds::from_offset(0, 7),
            phase,
        };
        let invalid = Some(AnimationError::Config(ConfigError::InvalidPhase));

        for phase in [300.0, 256.0, -1.0, f64::NAN] {
            let config = SchedulerConfig::new(geometry())
                .with_segment(segment(phase))
                .unwrap();
            assert_eq!(config_error::<LEDS>(&config), invalid);
        }

        let config = SchedulerConfig::new(geometry())
            .with_segment(segment(255.0))
            .unwrap();
        assert_eq!(config_error::<LEDS>(&config), None);

        let with_ring = |phase: f64| {
            config.clone().with_ring(RingConfig {
                bounds: RenderingBounds::from_offset(7, 12),
                phase,
            })
        };
        assert_eq!(config_error::<LEDS>(&with_ring(400.0)), invalid);
        assert_eq!(config_error::<LEDS>(&with_ring(128.0)), None);
    }

    #[test]
    fn test_unlock_uses_each_segments_first_sensor() {
        let config = SchedulerConfig::new(geometry())
            .with_segment(SegmentConfig {
                sensors: &[0.0],
                bounds: RenderingBounds::from_offset(0, 1),
                phase: 0.0,
            })
            .unwrap()
            .with_segment(SegmentConfig {
                sensors: &[12.0, 6.0],
                bounds: RenderingBounds::from_offset(1, 2),
                phase: 0.0,
            })
            .unwrap();
        let mut scheduler = SegmentScheduler::<3>::new(&config).unwrap();
        let inputs = InputSnapshot::default();

        while scheduler.cycle() == 0 {
            scheduler.advance();
        }

        let (mut dark, mut lit) = (0, 0);
        while scheduler.cycle() == 1 {
            let elapsed = scheduler.segment_state(1).unwrap().elapsed;
            let pos = elapsed * 24.0;
            let reach = 1.5 + pos;
            let frame = scheduler.render(&inputs).unwrap().to_vec();

            // The sensor at 6 sits inside the trailing window here.
            if (6.0..=12.0).contains(&pos) {
                if reach < 12.0 {
                    assert_eq!(frame[2], BLACK);
                    dark += 1;
                } else {
                    assert_ne!(frame[2], BLACK);
                    lit += 1;
                }
            }
            scheduler.advance();
        }
        assert!(dark > 0);
        assert!(lit > 0);
    }
}
