use maplet_options::prelude::*;

/// Integration tests for moving options across a process boundary
/// These tests only use the public API, the way an embedding app would
#[cfg(test)]
mod transfer_tests {
    use super::*;

    /// Options with every optional field populated and most defaults changed
    #[allow(deprecated)]
    fn everything_set() -> MapOptions {
        let fonts = SystemFonts::new().install("Noto Sans CJK SC");
        let icon = CompassImage::from_rgba(1, 2, vec![10, 20, 30, 255, 40, 50, 60, 255])
            .expect("2 rgba pixels");

        MapOptions::new()
            .with_camera(
                CameraPosition::new(LatLng::new(31.23, 121.47), 13.5)
                    .with_tilt(45.0)
                    .with_bearing(270.0)
                    .with_padding([0.0, 16.0, 0.0, 48.0]),
            )
            .with_debug_active(true)
            .with_min_zoom(1.0)
            .with_max_zoom(20.0)
            .with_min_pitch(5.0)
            .with_max_pitch(55.0)
            .with_compass_enabled(false)
            .with_compass_gravity(Gravity::BOTTOM | Gravity::END)
            .with_compass_margins([10, 20, 30, 40])
            .with_compass_fades_when_facing_north(false)
            .with_compass_image(icon)
            .with_logo_enabled(false)
            .with_logo_gravity(Gravity::TOP | Gravity::START)
            .with_logo_margins([1, 1, 1, 1])
            .with_attribution_enabled(false)
            .with_attribution_gravity(Gravity::TOP | Gravity::END)
            .with_attribution_margins([0, 0, 0, 0])
            .with_attribution_tint_color(Some(Color::LIGHT_GRAY))
            .with_rotate_gestures_enabled(false)
            .with_scroll_gestures_enabled(false)
            .with_horizontal_scroll_gestures_enabled(false)
            .with_tilt_gestures_enabled(false)
            .with_zoom_gestures_enabled(false)
            .with_double_tap_gestures_enabled(false)
            .with_quick_zoom_gestures_enabled(false)
            .with_texture_mode(true)
            .with_translucent_texture_surface(true)
            .with_foreground_load_color(Color(0x8000_FF00))
            .with_render_surface_on_top(true)
            .with_pixel_ratio(3.0)
            .with_prefetches_tiles(false)
            .with_prefetch_zoom_delta(0)
            .with_api_base_uri("https://api.example/v2")
            .with_local_ideograph_font(fonts.select_families(&[
                "Noto Sans CJK SC".to_string(),
                "serif".to_string(),
            ]))
            .with_local_ideograph_font_family_enabled(false)
            .with_cross_source_collisions(false)
            .with_action_journal_enabled(true)
            .with_action_journal_path("/var/lib/maplet/journal")
            .with_action_journal_log_file_size(256 * 1024)
            .with_action_journal_log_file_count(12)
            .with_action_journal_rendering_report_interval(15)
    }

    /// Default options survive a round trip, including absent optionals
    #[test]
    fn test_default_round_trip() {
        let options = MapOptions::new();
        let restored = MapOptions::from_bytes(&options.to_bytes().unwrap()).unwrap();

        assert_eq!(restored, options);
        assert!(restored.camera().is_none());
        assert!(restored.compass_margins().is_none());
        assert!(restored.compass_image().is_none());
        assert!(restored.attribution_tint_color().is_none());
    }

    /// Every field survives a round trip
    #[test]
    #[allow(deprecated)]
    fn test_everything_set_round_trip() {
        let options = everything_set();
        let restored = decode(&encode(&options).unwrap()).unwrap();

        assert_eq!(restored, options);
        assert_eq!(restored.stable_hash(), options.stable_hash());
        assert!(restored.local_ideograph_font_family().is_none());
        assert!(!restored.prefetches_tiles());
        assert_eq!(restored.prefetch_zoom_delta(), 0);
        assert_eq!(
            restored
                .with_local_ideograph_font_family_enabled(true)
                .local_ideograph_font_family(),
            Some("Noto Sans CJK SC")
        );
    }

    /// Resolved options survive a round trip
    #[test]
    fn test_resolved_round_trip() {
        let attrs = Attributes::new()
            .with(keys::API_BASE_URI, AttrValue::String("https://tiles.example".into()))
            .with(keys::UI_COMPASS_MARGIN_RIGHT, AttrValue::Dimension(22.0));
        let options = Resolver::new()
            .with_files_dir("/data/files")
            .resolve(&attrs, 2.75);

        let bytes = options.to_bytes().unwrap();
        assert_eq!(MapOptions::from_bytes(&bytes).unwrap(), options);
    }

    /// Encoding is deterministic, so equal options produce equal bytes
    #[test]
    fn test_encoding_is_deterministic() {
        assert_eq!(
            encode(&everything_set()).unwrap(),
            encode(&everything_set()).unwrap()
        );
        assert_ne!(
            encode(&everything_set()).unwrap(),
            encode(&MapOptions::new()).unwrap()
        );
    }

    /// The legacy prefetch flag travels on its own, apart from the delta
    #[test]
    #[allow(deprecated)]
    fn test_legacy_prefetch_flag_survives_transfer() {
        let options = MapOptions::new()
            .with_prefetches_tiles(false)
            .with_prefetch_zoom_delta(6);
        let restored = MapOptions::from_bytes(&options.to_bytes().unwrap()).unwrap();

        assert!(!restored.prefetches_tiles());
        assert_eq!(restored.prefetch_zoom_delta(), 6);
        assert!(restored.is_prefetch_enabled());
        assert_ne!(restored, MapOptions::new().with_prefetch_zoom_delta(6));
    }

    /// Garbage never yields partially populated options
    #[test]
    fn test_garbage_is_rejected() {
        let bytes = encode(&everything_set()).unwrap();

        assert!(matches!(
            decode(&bytes[..bytes.len() - 3]),
            Err(MapError::MalformedAggregate(_))
        ));
        assert!(matches!(
            decode(b"definitely not map options"),
            Err(MapError::MalformedAggregate(_))
        ));
    }

    /// Options can be handed to another thread once built
    #[test]
    fn test_handoff_to_another_thread() {
        let options = everything_set();
        let expected = options.clone();

        let received = std::thread::spawn(move || options)
            .join()
            .expect("thread finished");
        assert_eq!(received, expected);
    }
}
