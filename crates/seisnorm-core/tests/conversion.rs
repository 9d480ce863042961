use seisnorm_canonical::{
    CatalogValidator, OriginUncertainty, Polarity, StructuralValidator, ValidationMode,
};
use seisnorm_core::{
    convert, is_bulletin_record, CatalogAssembler, ConversionError, ConversionOptions, JsonNode, StructureViolation,
};
use serde_json::{json, Value};

const PUBLIC_ID: &str = "2011-09-07T12:34:56";

fn make_record() -> Value {
    json!({
        "event_id": { "value": PUBLIC_ID },
        "event_type": {
            "account": "sysop",
            "user": "analyst",
            "value": "manual",
            "public": "true"
        },
        "type": "earthquake",
        "origin": {
            "program": "hyp2000",
            "time": { "value": "2011-09-07T12:34:56.120000", "uncertainty": 0.05 },
            "latitude": { "value": 47.7, "uncertainty": 1.2 },
            "longitude": { "value": 12.8, "uncertainty": 0.8 },
            "depth": { "value": 5.0, "uncertainty": 0.5 },
            "depth_type": "from location program",
            "earth_mod": "bay  2000",
            "originQuality": {
                "P_usedPhaseCount": 6,
                "S_usedPhaseCount": 4,
                "usedStationCount": 5,
                "standardError": "nan",
                "azimuthalGap": 120.0,
                "minimumDistance": 111.19492664455873,
                "medianDistance": "nan"
            }
        },
        "magnitude": [
            {
                "mag": { "value": 2.1, "uncertainty": 4.0 },
                "type": "Ml",
                "stationCount": 2,
                "program": "obspyck"
            },
            { "type": "Mw", "program": "none" }
        ],
        "pick": [
            {
                "waveform": {
                    "@networkCode": "BW",
                    "@stationCode": "RJOB",
                    "@locationCode": "",
                    "@channelCode": "EHZ"
                },
                "time": { "value": "2011-09-07T12:35:01.5" },
                "phaseHint": "P",
                "onset": "implusive",
                "polarity": "up",
                "weight": 1,
                "epi_dist": { "value": 111.19492664455873 },
                "azimuth": { "value": 45.0 },
                "phase_res": { "value": 0.12 },
                "phase_weight": { "value": 1.0 },
                "incident": { "value": "nan" }
            },
            {
                "waveform": { "@stationCode": "MUN1_" },
                "phaseHint": "S"
            },
            {
                "waveform": { "@networkCode": "GR", "@stationCode": "FUR", "@channelCode": "BHZ" },
                "time": { "value": "2011-09-07T12:35:04" },
                "phaseHint": "S",
                "onset": "Emergent",
                "polarity": "poordown",
                "incident": { "value": 34.5 }
            }
        ],
        "stationMagnitude": [
            { "mag": { "value": 2.0 }, "channels": "EHZ, EHN", "station": "RJOB", "weight": 0.5 },
            { "mag": { "value": 2.2 }, "channels": "EHZ", "station": "WET" }
        ],
        "focalMechanism": {
            "program": "focmec",
            "stationPolarityCount": 40,
            "stationPolarityErrorCount": 4,
            "possibleSolutionCount": 3,
            "nodalPlanes": {
                "nodalPlane1": {
                    "strike": { "value": 120.0, "uncertainty": 5.0, "confidenceLevel": 95.0 },
                    "dip": { "value": 60.0 },
                    "rake": { "value": -90.0 }
                }
            }
        }
    })
}

fn id(kind: &str, sequence: usize) -> String {
    format!("smi:de.erdbeben-in-bayern/{}/{}/{}", kind, PUBLIC_ID, sequence)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn converts_full_record_into_single_event_catalog() {
    let record = make_record();
    let catalog = convert("obspyck_2011-09-07.xml", &JsonNode::new(&record)).unwrap();

    assert_eq!(catalog.resource_id.as_ref(), id("catalog", 1));
    assert_eq!(catalog.events.len(), 1);
    let event = &catalog.events[0];
    assert_eq!(event.resource_id.as_ref(), id("event", 1));
    assert_eq!(event.origins.len(), 1);
    assert_eq!(event.event_type.as_deref(), Some("earthquake"));
    assert_eq!(event.creation_info.author.as_deref(), Some("analyst"));
    assert_eq!(event.creation_info.agency_id, "Erdbebendienst Bayern");
    assert_eq!(event.extra["public"].value, json!(true));
    assert_eq!(event.extra["evaluationMode"].value, json!("manual"));
    assert_eq!(event.extra["public"].namespace.prefix, "edb");
}

#[test]
fn origin_follows_obspyck_conventions() {
    let record = make_record();
    let catalog = convert("obspyck_2011-09-07.xml", &JsonNode::new(&record)).unwrap();
    let origin = &catalog.events[0].origins[0];

    assert_eq!(origin.resource_id.as_ref(), id("origin", 1));
    assert_eq!(origin.depth.value, Some(-5000.0));
    assert_eq!(origin.depth.errors.uncertainty, Some(500.0));
    assert_eq!(origin.latitude.value, Some(47.7));
    assert!(origin.latitude.errors.is_empty());
    assert_eq!(origin.time.errors.uncertainty, Some(0.05));
    assert_eq!(
        origin.time.value.unwrap().to_rfc3339(),
        "2011-09-07T12:34:56.120+00:00"
    );
    assert_eq!(origin.depth_type.as_deref(), Some("from location"));
    assert_eq!(
        origin.earth_model_id.as_ref().unwrap().as_ref(),
        "smi:de.erdbeben-in-bayern/earth_model/bay,2000"
    );
    assert_eq!(
        origin.method_id.as_ref().unwrap().as_ref(),
        "smi:de.erdbeben-in-bayern/location_method/hyp2000"
    );

    match origin.origin_uncertainty.as_ref().unwrap() {
        OriginUncertainty::Ellipse {
            min_horizontal_uncertainty,
            max_horizontal_uncertainty,
            azimuth_max_horizontal_uncertainty,
        } => {
            assert_close(*min_horizontal_uncertainty, 800.0);
            assert_close(*max_horizontal_uncertainty, 1200.0);
            assert_eq!(*azimuth_max_horizontal_uncertainty, 0.0);
        }
        other => panic!("expected ellipse, got {other:?}"),
    }

    let quality = origin.quality.as_ref().unwrap();
    assert_eq!(quality.used_phase_count, Some(10));
    assert_eq!(quality.extra["P_usedPhaseCount"].value, json!(6));
    assert_eq!(quality.extra["S_usedPhaseCount"].value, json!(4));
    assert_eq!(quality.used_station_count, Some(5));
    assert_eq!(quality.standard_error, None);
    assert_eq!(quality.median_distance, None);
    assert_eq!(quality.azimuthal_gap, Some(120.0));
    assert_close(quality.minimum_distance.unwrap(), 1.0);
}

#[test]
fn magnitudes_skip_valueless_entries_and_take_root_of_variance() {
    let record = make_record();
    let catalog = convert("obspyck_2011-09-07.xml", &JsonNode::new(&record)).unwrap();
    let magnitudes = &catalog.events[0].magnitudes;

    assert_eq!(magnitudes.len(), 1);
    assert_eq!(magnitudes[0].mag.value, Some(2.1));
    assert_eq!(magnitudes[0].mag.errors.uncertainty, Some(2.0));
    assert_eq!(magnitudes[0].magnitude_type.as_deref(), Some("Ml"));
    assert_eq!(magnitudes[0].station_count, Some(2));
    assert_eq!(
        magnitudes[0].method_id.as_ref().unwrap().as_ref(),
        "smi:de.erdbeben-in-bayern/magnitude_method/obspyck"
    );
}

#[test]
fn magnitude_uncertainty_is_kept_for_other_sources() {
    let record = make_record();
    let catalog = convert("baynet_2011-09-07.xml", &JsonNode::new(&record)).unwrap();
    assert_eq!(
        catalog.events[0].magnitudes[0].mag.errors.uncertainty,
        Some(4.0)
    );
}

#[test]
fn picks_drop_timeless_entries_and_normalize_fields() {
    let record = make_record();
    let catalog = convert("obspyck_2011-09-07.xml", &JsonNode::new(&record)).unwrap();
    let picks = &catalog.events[0].picks;

    assert_eq!(picks.len(), 2);
    assert_eq!(picks[0].resource_id.as_ref(), id("pick", 1));
    assert_eq!(picks[1].resource_id.as_ref(), id("pick", 3));

    assert_eq!(picks[0].onset.as_deref(), Some("impulsive"));
    assert_eq!(picks[0].polarity, Some(Polarity::Positive));
    assert_eq!(picks[0].extra["weight"].value, json!(1));
    assert_eq!(picks[0].waveform_id.network_code, "BW");
    assert_eq!(picks[0].waveform_id.channel_code.as_deref(), Some("EHZ"));

    assert_eq!(picks[1].onset.as_deref(), Some("emergent"));
    assert_eq!(picks[1].polarity, Some(Polarity::Negative));
    assert_eq!(picks[1].waveform_id.network_code, "GR");
    assert_eq!(picks[1].waveform_id.location_code, "");
    assert!(picks[1].extra.is_empty());
}

#[test]
fn arrivals_pair_with_retained_picks_by_position() {
    let record = make_record();
    let catalog = convert("obspyck_2011-09-07.xml", &JsonNode::new(&record)).unwrap();
    let event = &catalog.events[0];
    let arrivals = &event.origins[0].arrivals;

    assert_eq!(arrivals.len(), event.picks.len());
    for (arrival, pick) in arrivals.iter().zip(&event.picks) {
        assert_eq!(arrival.pick_id, pick.resource_id);
    }
    assert_eq!(arrivals[1].resource_id.as_ref(), id("arrival", 3));

    assert_eq!(arrivals[0].phase.as_deref(), Some("P"));
    assert_close(arrivals[0].distance.unwrap(), 1.0);
    assert_eq!(arrivals[0].azimuth, Some(45.0));
    assert_eq!(arrivals[0].takeoff_angle, None);
    assert_eq!(arrivals[0].time_residual, Some(0.12));
    assert_eq!(arrivals[0].time_weight, Some(1.0));
    assert_eq!(arrivals[1].takeoff_angle, Some(34.5));
}

#[test]
fn station_magnitudes_resolve_networks_and_link_contributions() {
    let record = make_record();
    let catalog = convert("obspyck_2011-09-07.xml", &JsonNode::new(&record)).unwrap();
    let event = &catalog.events[0];
    let origin_id = &event.origins[0].resource_id;

    let rjob = &event.station_magnitudes[0];
    assert_eq!(rjob.resource_id.as_ref(), id("station_magnitude", 1));
    assert_eq!(rjob.origin_id.as_ref(), Some(origin_id));
    // Taken from the RJOB pick.
    assert_eq!(rjob.waveform_id.network_code, "BW");
    assert_eq!(rjob.waveform_id.channel_code, None);

    let wet = &event.station_magnitudes[1];
    // Taken from the static table.
    assert_eq!(wet.waveform_id.network_code, "GR");
    assert_eq!(wet.waveform_id.channel_code.as_deref(), Some("EHZ"));
    assert_eq!(wet.mag.value, Some(2.2));

    let contributions = &event.magnitudes[0].station_magnitude_contributions;
    assert_eq!(contributions.len(), 2);
    assert_eq!(contributions[0].station_magnitude_id, rjob.resource_id);
    assert_eq!(contributions[0].weight, Some(0.5));
    assert_eq!(contributions[1].station_magnitude_id, wet.resource_id);
    assert_eq!(contributions[1].weight, None);
}

#[test]
fn focal_mechanism_carries_misfit_and_solution_count() {
    let record = make_record();
    let catalog = convert("obspyck_2011-09-07.xml", &JsonNode::new(&record)).unwrap();
    let event = &catalog.events[0];
    let focmec = &event.focal_mechanisms[0];

    assert_eq!(focmec.resource_id.as_ref(), id("focal_mechanism", 1));
    assert_eq!(focmec.misfit, Some(0.1));
    assert_eq!(focmec.station_polarity_count, Some(40));
    assert_eq!(
        focmec.triggering_origin_id.as_ref(),
        Some(&event.origins[0].resource_id)
    );
    assert_eq!(focmec.comments[0].text, "Possible Solution Count: 3");

    let plane = &focmec.nodal_planes.nodal_plane_1;
    assert_eq!(plane.strike.value, Some(120.0));
    assert_eq!(plane.strike.errors.uncertainty, Some(5.0));
    assert_eq!(plane.strike.errors.confidence_level, None);
    assert_eq!(plane.rake.value, Some(-90.0));
}

#[test]
fn focal_mechanism_without_nodal_planes_is_skipped() {
    let mut record = make_record();
    record["focalMechanism"] = json!([
        { "program": "focmec", "stationPolarityCount": 10 },
        { "program": "focmec", "nodalPlanes": {} }
    ]);
    let catalog = convert("obspyck_2011-09-07.xml", &JsonNode::new(&record)).unwrap();
    assert!(catalog.events[0].focal_mechanisms.is_empty());
}

#[test]
fn zero_polarity_count_leaves_misfit_unset() {
    let mut record = make_record();
    record["focalMechanism"]["stationPolarityCount"] = json!(0);
    let catalog = convert("obspyck_2011-09-07.xml", &JsonNode::new(&record)).unwrap();
    assert_eq!(catalog.events[0].focal_mechanisms[0].misfit, None);
}

#[test]
fn multiple_origins_are_rejected() {
    let mut record = make_record();
    let origin = record["origin"].clone();
    record["origin"] = json!([origin.clone(), origin]);

    let err = convert("obspyck_2011-09-07.xml", &JsonNode::new(&record)).unwrap_err();
    assert!(matches!(
        err,
        ConversionError::Structure(StructureViolation::OriginCount { found: 2 })
    ));
}

#[test]
fn record_without_origin_is_rejected() {
    let mut record = make_record();
    record.as_object_mut().unwrap().remove("origin");

    let err = convert("obspyck_2011-09-07.xml", &JsonNode::new(&record)).unwrap_err();
    assert!(matches!(
        err,
        ConversionError::Structure(StructureViolation::OriginCount { found: 0 })
    ));
}

#[test]
fn phase_delay_aborts_conversion() {
    let mut record = make_record();
    record["pick"][2]["phase_delay"] = json!(0.25);

    let err = convert("obspyck_2011-09-07.xml", &JsonNode::new(&record)).unwrap_err();
    match err {
        ConversionError::PhaseDelayUnsupported { sequence, value } => {
            assert_eq!(sequence, 3);
            assert_eq!(value, "0.25");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_phase_delay_is_ignored() {
    let mut record = make_record();
    record["pick"][0]["phase_delay"] = Value::Null;
    assert!(convert("obspyck_2011-09-07.xml", &JsonNode::new(&record)).is_ok());
}

#[test]
fn unresolvable_station_network_aborts_conversion() {
    let mut record = make_record();
    record["stationMagnitude"][1]["station"] = json!("ZZZZ");

    let err = convert("obspyck_2011-09-07.xml", &JsonNode::new(&record)).unwrap_err();
    match err {
        ConversionError::NetworkResolution { station } => assert_eq!(station, "ZZZZ"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_record_name_is_rejected() {
    let record = make_record();
    let err = convert("catalog_2011.xml", &JsonNode::new(&record)).unwrap_err();
    assert!(matches!(err, ConversionError::Classification { .. }));
}

#[test]
fn missing_event_id_is_a_structure_error() {
    let mut record = make_record();
    record.as_object_mut().unwrap().remove("event_id");

    let err = convert("obspyck_2011-09-07.xml", &JsonNode::new(&record)).unwrap_err();
    assert!(matches!(
        err,
        ConversionError::Structure(StructureViolation::MissingField {
            field: "event_id/value",
            ..
        })
    ));
}

#[test]
fn station_magnitudes_need_a_magnitude() {
    let mut record = make_record();
    record["magnitude"] = json!([{ "type": "Ml" }]);

    let err = convert("obspyck_2011-09-07.xml", &JsonNode::new(&record)).unwrap_err();
    assert!(matches!(
        err,
        ConversionError::Structure(StructureViolation::ContributionsWithoutMagnitude { count: 2 })
    ));
}

#[test]
fn event_header_rules() {
    let mut record = make_record();
    record["event_type"]["account"] = json!("guest");
    record["type"] = json!("induced earthquake");

    let catalog = convert("gof_2011-09-07.xml", &JsonNode::new(&record)).unwrap();
    let event = &catalog.events[0];
    assert_eq!(event.extra["public"].value, json!(false));
    assert_eq!(event.event_type.as_deref(), Some("induced or triggered event"));
    assert_eq!(event.creation_info.author.as_deref(), Some("seiscomp3"));

    record["type"] = json!("null");
    let catalog = convert("gof_2011-09-07.xml", &JsonNode::new(&record)).unwrap();
    assert_eq!(catalog.events[0].event_type, None);
}

#[test]
fn creation_time_comes_from_options() {
    let record = make_record();
    let now = "2024-01-01T00:00:00Z".parse().unwrap();
    let assembler = CatalogAssembler::new(ConversionOptions {
        creation_time: Some(now),
    });
    let catalog = assembler
        .convert("toni_2011-09-07.xml", &JsonNode::new(&record))
        .unwrap();
    assert_eq!(catalog.events[0].creation_info.creation_time, Some(now));
}

#[test]
fn converted_catalog_passes_strict_validation() -> Result<(), Box<dyn std::error::Error>> {
    let record = make_record();
    let catalog = convert("obspyck_2011-09-07.xml", &JsonNode::new(&record))?;
    StructuralValidator::new(ValidationMode::Strict)
        .validate(&catalog)
        .into_result()?;
    Ok(())
}

#[test]
fn records_convert_independently_across_threads() {
    let record = make_record();
    let assembler = CatalogAssembler::default();

    let (seiscomp, baynet) = std::thread::scope(|scope| {
        let a = scope.spawn(|| assembler.convert("gof_1.xml", &JsonNode::new(&record)));
        let b = scope.spawn(|| assembler.convert("baynet_1.xml", &JsonNode::new(&record)));
        (a.join().unwrap().unwrap(), b.join().unwrap().unwrap())
    });

    assert_eq!(seiscomp.events[0].origins[0].depth.value, Some(5000.0));
    assert_eq!(baynet.events[0].origins[0].depth.value, Some(-5000.0));
}

#[test]
fn bulletin_records_need_event_id_and_event_type_value() {
    let record = make_record();
    assert!(is_bulletin_record(&JsonNode::new(&record)));

    let mut without_type = make_record();
    without_type["event_type"]
        .as_object_mut()
        .unwrap()
        .remove("value");
    assert!(!is_bulletin_record(&JsonNode::new(&without_type)));

    let mut blank_id = make_record();
    blank_id["event_id"]["value"] = json!("  ");
    assert!(!is_bulletin_record(&JsonNode::new(&blank_id)));

    let station_list = json!({ "station": [{ "@code": "RJOB" }] });
    assert!(!is_bulletin_record(&JsonNode::new(&station_list)));
}
