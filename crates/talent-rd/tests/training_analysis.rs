use std::io::Cursor;

use talent_rd::workflows::training::{
    analyze_training_hours, AnalysisRequest, HeadcountSource, RdTeamMatcher, TrainingLogImporter,
    YearRange,
};

const HOURS_CSV: &str = "\
Year,Training Type,Hours
2023,technical,320
2023,leadership,80
2024,technical,400.5
2024,global,59.5
";

const HEADCOUNT_CSV: &str = "\
Year,Team,Headcount
2023,연구 1팀,10
2023,연구 2팀,6
2024,연구 1팀,11
2024,연구 2팀,5
";

#[test]
fn imported_logs_feed_the_analyzer_end_to_end() {
    let hour_logs = TrainingLogImporter::hours_from_reader(Cursor::new(HOURS_CSV))
        .expect("hours import");
    let headcount_logs = TrainingLogImporter::headcounts_from_reader(Cursor::new(HEADCOUNT_CSV))
        .expect("headcount import");

    let request = AnalysisRequest {
        range: YearRange::new(2023, 2024),
        headcount_source: HeadcountSource::Logs,
        roster: Vec::new(),
        matcher: RdTeamMatcher::default(),
        include_type_breakdown: true,
        include_yearly_breakdown: true,
    };

    let report = analyze_training_hours(&hour_logs, &headcount_logs, &request);

    assert_eq!(report.total_hours, 860.0);
    assert_eq!(report.cumulative_employees, 32);
    // 860 / 32, rounded to two decimals.
    assert_eq!(report.average_hours_per_person, 26.88);

    let by_type = report.training_type_breakdown.expect("type breakdown");
    assert_eq!(by_type.get("technical"), Some(&720.5));
    assert_eq!(by_type.get("leadership"), Some(&80.0));
    assert_eq!(by_type.get("global"), Some(&59.5));

    let yearly = report.yearly_breakdown.expect("yearly breakdown");
    assert_eq!(yearly.len(), 2);
    assert_eq!(yearly[0].headcount, 16);
    assert_eq!(yearly[0].average_hours, 25.0);
    assert_eq!(yearly[1].headcount, 16);
    assert_eq!(yearly[1].average_hours, 28.75);
}

#[test]
fn report_serializes_without_disabled_breakdowns() {
    let hour_logs = TrainingLogImporter::hours_from_reader(Cursor::new(HOURS_CSV))
        .expect("hours import");

    let request = AnalysisRequest {
        range: YearRange::new(2023, 2024),
        headcount_source: HeadcountSource::Logs,
        roster: Vec::new(),
        matcher: RdTeamMatcher::default(),
        include_type_breakdown: false,
        include_yearly_breakdown: false,
    };

    let report = analyze_training_hours(&hour_logs, &[], &request);
    let json = serde_json::to_value(&report).expect("serializes");

    assert!(json.get("training_type_breakdown").is_none());
    assert!(json.get("yearly_breakdown").is_none());
    assert_eq!(json["total_hours"], 860.0);
    assert_eq!(json["average_hours_per_person"], 0.0);
}
