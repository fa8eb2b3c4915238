use big_five::workflows::eligibility::{EligibilityError, EligibilityGate, RespondentProfile};
use big_five::workflows::roster::RosterImporter;
use std::io::Cursor;
use std::sync::Arc;

const ROSTER_CSV: &str = "cnic , name , region , dealership\n\
12345-1234567-1 , Ayesha Khan , Lahore , Gulberg Motors\n\
35202-2222222-2,Bilal Ahmed,Islamabad,Blue Area Motors\n\
 , Unnamed , Multan , Nowhere Motors\n";

fn gate() -> EligibilityGate {
    let roster = RosterImporter::from_reader(Cursor::new(ROSTER_CSV)).expect("roster parses");
    EligibilityGate::new(Arc::new(roster))
}

#[test]
fn identifiers_with_fewer_than_thirteen_digits_are_format_errors() {
    let gate = gate();
    for raw in ["", "1", "12345-1234567", "123451234567", "12345-12x4567-"] {
        match gate.validate_and_enrich(raw) {
            Err(EligibilityError::Format { .. }) => {}
            other => panic!("expected format error for {raw:?}, got {other:?}"),
        }
    }
}

#[test]
fn rostered_identifier_returns_entry_fields_exactly() {
    let gate = gate();
    let entry = gate
        .validate_and_enrich("12345-1234567-1")
        .expect("identifier is on the roster");
    assert_eq!(entry.name, "Ayesha Khan");
    assert_eq!(entry.region, "Lahore");
    assert_eq!(entry.dealership, "Gulberg Motors");
}

#[test]
fn well_formed_but_absent_identifier_is_not_found() {
    match gate().validate_and_enrich("11111-1111111-1") {
        Err(EligibilityError::NotFound { cnic }) => assert_eq!(cnic, "11111-1111111-1"),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn rows_without_an_identifier_are_skipped_silently() {
    assert_eq!(gate().roster().len(), 2);
}

#[test]
fn failed_enrichment_leaves_profile_untouched() {
    let gate = gate();
    let profile = RespondentProfile {
        cnic: "35202-2222222".to_string(),
        name: "Bilal".to_string(),
        city: "Multan".to_string(),
        dealership: String::new(),
    };
    let snapshot = profile.clone();

    assert!(gate.enrich(&profile).is_err());
    assert_eq!(profile, snapshot);

    let enriched = gate
        .enrich(&RespondentProfile {
            cnic: "3520222222222".to_string(),
            ..profile
        })
        .expect("on roster once complete");
    assert_eq!(enriched.cnic, "35202-2222222-2");
    assert_eq!(enriched.city, "Islamabad");
}

#[test]
fn short_roster_rows_still_admit_their_participant() {
    let csv = "cnic,name,region,dealership\n42101-7654321-3,Sana Malik\n";
    let roster = RosterImporter::from_reader(Cursor::new(csv)).expect("roster parses");
    let gate = EligibilityGate::new(Arc::new(roster));

    let entry = gate
        .validate_and_enrich("4210176543213")
        .expect("short row is still on the roster");
    assert_eq!(entry.name, "Sana Malik");
    assert!(entry.region.is_empty());

    let enriched = gate
        .enrich(&RespondentProfile {
            cnic: "4210176543213".to_string(),
            name: String::new(),
            city: "Karachi".to_string(),
            dealership: "Clifton Auto".to_string(),
        })
        .expect("admitted");
    assert_eq!(enriched.name, "Sana Malik");
    assert_eq!(enriched.city, "Karachi");
    assert_eq!(enriched.dealership, "Clifton Auto");
}
