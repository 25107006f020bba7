#[cfg(test)]
mod tests {
    use crate::logic::*;
    use schedulify_db::{Availability, AvailabilityCode, Candidate, User};

    fn candidate(id: i64) -> Candidate {
        Candidate {
            candidate_id: id,
            candidate_name: format!("候補{}", id),
            schedule_id: "s".to_string(),
        }
    }

    fn answer(user_id: i64, candidate_id: i64, code: AvailabilityCode) -> Availability {
        Availability {
            candidate_id,
            user_id,
            availability: code,
            schedule_id: "s".to_string(),
        }
    }

    #[test]
    fn test_parse_candidates_handles_crlf_and_blank_lines() {
        let parsed = parse_candidates("テスト候補1\r\nテスト候補2\r\n\r\n  テスト候補3  \n\n");
        assert_eq!(parsed, ["テスト候補1", "テスト候補2", "テスト候補3"]);
        assert!(parse_candidates("").is_empty());
        assert!(parse_candidates("\r\n \n").is_empty());
    }

    #[test]
    fn test_schedule_name_is_trimmed_and_truncated() {
        assert_eq!(normalize_schedule_name("  テスト予定1 "), "テスト予定1");
        assert_eq!(normalize_schedule_name("   "), UNTITLED_SCHEDULE_NAME);

        let long = "あ".repeat(300);
        let normalized = normalize_schedule_name(&long);
        assert_eq!(normalized.chars().count(), MAX_SCHEDULE_NAME_CHARS);
    }

    fn text(value: &str) -> AvailabilityValue {
        AvailabilityValue::Text(value.to_string())
    }

    #[test]
    fn test_parse_availability() {
        assert_eq!(parse_availability(&text("2")).unwrap(), AvailabilityCode::Present);
        assert_eq!(parse_availability(&text(" 0 ")).unwrap(), AvailabilityCode::Absent);
        assert_eq!(
            parse_availability(&AvailabilityValue::Number(1)).unwrap(),
            AvailabilityCode::Unknown
        );
        assert!(matches!(
            parse_availability(&text("3")),
            Err(schedulify_common::SchedulifyError::ValidationError(_))
        ));
        assert!(parse_availability(&AvailabilityValue::Number(-1)).is_err());
        assert!(parse_availability(&text("yes")).is_err());
        assert!(parse_availability(&text("")).is_err());
    }

    #[test]
    fn test_availability_form_accepts_json_number_or_string() {
        let form: AvailabilityForm = serde_json::from_str(r#"{"availability":2}"#).unwrap();
        assert_eq!(form.availability, AvailabilityValue::Number(2));

        let form: AvailabilityForm = serde_json::from_str(r#"{"availability":"1"}"#).unwrap();
        assert_eq!(form.availability, text("1"));
    }

    #[test]
    fn test_create_form_reads_camel_case_json() {
        let form: CreateScheduleForm = serde_json::from_str(
            r#"{"scheduleName":"テスト予定1","memo":"テストメモ1\r\nテストメモ2","candidates":"a\r\nb"}"#,
        )
        .unwrap();
        assert_eq!(form.schedule_name, "テスト予定1");
        assert_eq!(form.memo, "テストメモ1\r\nテストメモ2");
        assert_eq!(parse_candidates(&form.candidates), ["a", "b"]);
    }

    #[test]
    fn test_availability_response_json_shape() {
        let json = serde_json::to_string(&AvailabilityResponse::ok(AvailabilityCode::Present)).unwrap();
        assert_eq!(json, r#"{"status":"OK","availability":2}"#);
    }

    #[test]
    fn test_matrix_defaults_to_absent_and_lists_viewer_first() {
        let matrix = AvailabilityMatrix::build(
            Some(User::new(5, "viewer")),
            vec![User::new(1, "alice"), User::new(5, "viewer")],
            vec![candidate(10), candidate(11)],
            &[
                answer(1, 10, AvailabilityCode::Present),
                answer(1, 11, AvailabilityCode::Unknown),
                answer(5, 10, AvailabilityCode::Present),
            ],
        );

        let names: Vec<_> = matrix.users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, ["viewer", "alice"]);
        assert_eq!(matrix.get(5, 11), AvailabilityCode::Absent);
        assert_eq!(matrix.get(1, 11), AvailabilityCode::Unknown);
        assert_eq!(matrix.present_count(10), 2);
        assert_eq!(matrix.present_count(11), 0);
    }
}
