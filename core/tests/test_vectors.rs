//! Verify the codec against fixtures stored in `test-vectors/codec.json`.
//!
//! Encode cases compare exact output strings, since stored bodies are sent to
//! supplier endpoints byte for byte. Load cases compare key/value content and
//! ignore the synthetic entry ids.

use serde_json::Value;
use supplier_core::{load_for_editing, prepare_for_submit, CodecError, EntryValue, KeyValueList, WireFormat};

fn vectors() -> Value {
    let raw = include_str!("../../test-vectors/codec.json");
    serde_json::from_str(raw).unwrap()
}

fn parse_format(case: &Value) -> WireFormat {
    case["format"].as_str().unwrap().parse().unwrap()
}

fn entry_value(v: &Value) -> EntryValue {
    match v {
        Value::String(s) => EntryValue::Text(s.clone()),
        Value::Array(items) => EntryValue::List(items.iter().map(|i| i.as_str().unwrap().to_string()).collect()),
        other => panic!("unsupported entry value: {other}"),
    }
}

fn parse_entries(case: &Value) -> Vec<(String, EntryValue)> {
    case["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let pair = pair.as_array().unwrap();
            (pair[0].as_str().unwrap().to_string(), entry_value(&pair[1]))
        })
        .collect()
}

fn error_name(err: &CodecError) -> &'static str {
    match err {
        CodecError::Json(_) => "Json",
        CodecError::Xml { .. } => "Xml",
        CodecError::NotSoapEnvelope => "NotSoapEnvelope",
        CodecError::MissingSoapBody => "MissingSoapBody",
        CodecError::SoapBodyRoot { .. } => "SoapBodyRoot",
        CodecError::MissingSoapRoot => "MissingSoapRoot",
        CodecError::DuplicateSoapRoot => "DuplicateSoapRoot",
        CodecError::InvalidElementName(_) => "InvalidElementName",
        CodecError::UnknownFormat(_) => "UnknownFormat",
    }
}

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

#[test]
fn encode_test_vectors() {
    for case in vectors()["encode"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let list: KeyValueList = parse_entries(case).into_iter().collect();
        let body = prepare_for_submit(parse_format(case), &list).unwrap();
        assert_eq!(body, case["expected"].as_str().unwrap(), "{name}: body");
    }
}

#[test]
fn encode_error_vectors() {
    for case in vectors()["encode_errors"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let list: KeyValueList = parse_entries(case).into_iter().collect();
        let err = prepare_for_submit(parse_format(case), &list).unwrap_err();
        assert_eq!(error_name(&err), case["error"].as_str().unwrap(), "{name}: error");
    }
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

#[test]
fn load_test_vectors() {
    for case in vectors()["load"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let (format, list) = load_for_editing(case["body"].as_str().unwrap(), None).unwrap();
        assert_eq!(format, parse_format(case), "{name}: format");
        assert_eq!(list.pairs(), parse_entries(case), "{name}: entries");
    }
}

#[test]
fn load_error_vectors() {
    for case in vectors()["load_errors"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        assert!(load_for_editing(case["body"].as_str().unwrap(), None).is_err(), "{name}");
    }
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn encoded_vectors_reload_as_the_same_entries() {
    for case in vectors()["encode"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let format = parse_format(case);
        let list: KeyValueList = parse_entries(case).into_iter().collect();
        let (detected, back) = load_for_editing(case["expected"].as_str().unwrap(), None).unwrap();
        assert_eq!(detected, format, "{name}: format");
        assert_eq!(back.pairs(), list.pairs(), "{name}: entries");
    }
}

#[test]
fn repeated_edit_save_cycles_are_stable() {
    let mut list = KeyValueList::new();
    list.push("SOAPRootName", "ConsultaVeiculo");
    list.push("placa", "ABC1234");

    let first = prepare_for_submit(WireFormat::Soap, &list).unwrap();
    let mut body = first.clone();
    for _ in 0..3 {
        let (format, reloaded) = load_for_editing(&body, None).unwrap();
        body = prepare_for_submit(format, &reloaded).unwrap();
    }
    assert_eq!(body, first);
}
