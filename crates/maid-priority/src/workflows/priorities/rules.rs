use super::domain::{
    WorkerRecord, WorkerType, NOTE_PRIORITIZE_VISA, NOTE_SUPER_ANGRY_CLIENT, STAGE_PENDING_COC,
    STAGE_PENDING_EXIT_PERMIT,
};
use super::nationality::{is_african, is_ethiopian, is_filipina};
use super::taxonomy::GatedCategory;

pub(crate) struct RuleContext {
    pub mv_urgency_days: u32,
}

/// One entry of the ordered rule table.
pub(crate) struct PriorityRule {
    pub priority: u8,
    pub gate: Option<GatedCategory>,
    pub matches: fn(&WorkerRecord, &RuleContext) -> bool,
}

const fn rule(priority: u8, matches: fn(&WorkerRecord, &RuleContext) -> bool) -> PriorityRule {
    PriorityRule {
        priority,
        gate: None,
        matches,
    }
}

const fn gated(
    priority: u8,
    gate: GatedCategory,
    matches: fn(&WorkerRecord, &RuleContext) -> bool,
) -> PriorityRule {
    PriorityRule {
        priority,
        gate: Some(gate),
        matches,
    }
}

static RULES: [PriorityRule; 23] = [
    rule(1, mv_super_angry_client),
    rule(2, mv_prioritize_visa),
    rule(3, filipina_flight_within_two_to_four),
    rule(4, mv_over_urgency),
    rule(5, last_day_in_country_soon),
    gated(6, GatedCategory::FilipinaLiveIn, filipina_live_in_dubai),
    gated(7, GatedCategory::AfricanLiveIn, african_live_in_dubai),
    gated(8, GatedCategory::EthiopianLiveIn, ethiopian_live_in_dubai),
    rule(9, ethiopian_pending_coc_over_ten_days),
    gated(10, GatedCategory::FilipinaLiveOut, filipina_live_out_dubai),
    gated(11, GatedCategory::AfricanLiveOut, african_live_out_dubai),
    rule(12, filipina_flight_four_to_seven),
    rule(13, mv_within_urgency),
    rule(14, landed_live_in),
    rule(15, landed_live_out),
    rule(16, outcome_lawp),
    rule(17, filipina_flight_seven_to_fourteen),
    rule(18, african_attested_gcc),
    rule(19, ethiopian_pending_exit_permit),
    rule(20, african_mfa),
    rule(21, ethiopian_pending_coc),
    rule(22, african_gcc),
    rule(23, catch_all),
];

pub(crate) fn rule_table() -> &'static [PriorityRule] {
    &RULES
}

/// Finite numeric cell, or `None` so the rule reading it stays silent.
fn number(value: Option<f64>) -> Option<f64> {
    value.filter(|value| value.is_finite())
}

fn mv_super_angry_client(record: &WorkerRecord, _: &RuleContext) -> bool {
    record.is_type(WorkerType::Mv) && record.has_client_note(NOTE_SUPER_ANGRY_CLIENT)
}

fn mv_prioritize_visa(record: &WorkerRecord, _: &RuleContext) -> bool {
    record.is_type(WorkerType::Mv) && record.has_client_note(NOTE_PRIORITIZE_VISA)
}

fn filipina_flight_within_two_to_four(record: &WorkerRecord, _: &RuleContext) -> bool {
    is_filipina(&record.nationality)
        && number(record.flight_in_days).is_some_and(|days| days > 2.0 && days < 4.0)
}

fn mv_over_urgency(record: &WorkerRecord, ctx: &RuleContext) -> bool {
    record.is_type(WorkerType::Mv)
        && number(record.days_in_table).is_some_and(|days| days > f64::from(ctx.mv_urgency_days))
}

fn last_day_in_country_soon(record: &WorkerRecord, _: &RuleContext) -> bool {
    number(record.last_day_in_country).is_some_and(|days| days < 5.0)
}

fn filipina_live_in_dubai(record: &WorkerRecord, _: &RuleContext) -> bool {
    is_filipina(&record.nationality) && record.landed_in_dubai() && record.lives_in()
}

fn african_live_in_dubai(record: &WorkerRecord, _: &RuleContext) -> bool {
    is_african(&record.nationality) && record.landed_in_dubai() && record.lives_in()
}

fn ethiopian_live_in_dubai(record: &WorkerRecord, _: &RuleContext) -> bool {
    is_ethiopian(&record.nationality) && record.landed_in_dubai() && record.lives_in()
}

fn ethiopian_pending_coc_over_ten_days(record: &WorkerRecord, _: &RuleContext) -> bool {
    is_ethiopian(&record.nationality)
        && record.at_stage(STAGE_PENDING_COC)
        && number(record.days_in_table).is_some_and(|days| days > 10.0)
        && record.lives_in()
}

fn filipina_live_out_dubai(record: &WorkerRecord, _: &RuleContext) -> bool {
    is_filipina(&record.nationality) && record.landed_in_dubai() && record.lives_out()
}

fn african_live_out_dubai(record: &WorkerRecord, _: &RuleContext) -> bool {
    is_african(&record.nationality) && record.landed_in_dubai() && record.lives_out()
}

fn filipina_flight_four_to_seven(record: &WorkerRecord, _: &RuleContext) -> bool {
    is_filipina(&record.nationality)
        && number(record.flight_in_days).is_some_and(|days| (4.0..=7.0).contains(&days))
}

fn mv_within_urgency(record: &WorkerRecord, ctx: &RuleContext) -> bool {
    record.is_type(WorkerType::Mv)
        && number(record.days_in_table).is_some_and(|days| days <= f64::from(ctx.mv_urgency_days))
}

fn landed_live_in(record: &WorkerRecord, _: &RuleContext) -> bool {
    record.landed_in_dubai() && record.lives_in()
}

fn landed_live_out(record: &WorkerRecord, _: &RuleContext) -> bool {
    record.landed_in_dubai() && record.lives_out()
}

fn outcome_lawp(record: &WorkerRecord, _: &RuleContext) -> bool {
    record.is_lawp()
}

fn filipina_flight_seven_to_fourteen(record: &WorkerRecord, _: &RuleContext) -> bool {
    is_filipina(&record.nationality)
        && number(record.flight_in_days).is_some_and(|days| days > 7.0 && days <= 14.0)
}

fn african_attested_gcc(record: &WorkerRecord, _: &RuleContext) -> bool {
    is_african(&record.nationality) && record.attested_gcc
}

fn ethiopian_pending_exit_permit(record: &WorkerRecord, _: &RuleContext) -> bool {
    is_ethiopian(&record.nationality) && record.at_stage(STAGE_PENDING_EXIT_PERMIT)
}

fn african_mfa(record: &WorkerRecord, _: &RuleContext) -> bool {
    is_african(&record.nationality) && record.mfa
}

fn ethiopian_pending_coc(record: &WorkerRecord, _: &RuleContext) -> bool {
    is_ethiopian(&record.nationality) && record.at_stage(STAGE_PENDING_COC)
}

fn african_gcc(record: &WorkerRecord, _: &RuleContext) -> bool {
    is_african(&record.nationality) && record.gcc
}

fn catch_all(_: &WorkerRecord, _: &RuleContext) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RuleContext {
        RuleContext { mv_urgency_days: 5 }
    }

    fn matching(record: &WorkerRecord) -> Vec<u8> {
        rule_table()
            .iter()
            .filter(|rule| (rule.matches)(record, &ctx()))
            .map(|rule| rule.priority)
            .collect()
    }

    #[test]
    fn table_is_ordered_and_complete() {
        let priorities: Vec<u8> = rule_table().iter().map(|rule| rule.priority).collect();
        assert_eq!(priorities, (1..=23).collect::<Vec<u8>>());
        let gated: Vec<u8> = rule_table()
            .iter()
            .filter(|rule| rule.gate.is_some())
            .map(|rule| rule.priority)
            .collect();
        assert_eq!(gated, vec![6, 7, 8, 10, 11]);
    }

    #[test]
    fn flight_windows_respect_boundaries() {
        let mut record = WorkerRecord::new("r-1", "Ana");
        record.nationality = "Filipina".to_string();

        record.flight_in_days = Some(2.0);
        assert_eq!(matching(&record), vec![23]);

        record.flight_in_days = Some(3.0);
        assert_eq!(matching(&record), vec![3, 23]);

        record.flight_in_days = Some(4.0);
        assert_eq!(matching(&record), vec![12, 23]);

        record.flight_in_days = Some(7.0);
        assert_eq!(matching(&record), vec![12, 23]);

        record.flight_in_days = Some(14.0);
        assert_eq!(matching(&record), vec![17, 23]);

        record.flight_in_days = Some(15.0);
        assert_eq!(matching(&record), vec![23]);
    }

    #[test]
    fn missing_or_nan_numbers_never_match() {
        let mut record = WorkerRecord::new("r-2", "Bea");
        record.worker_type = Some(WorkerType::Mv);
        record.days_in_table = Some(f64::NAN);
        record.last_day_in_country = None;
        assert_eq!(matching(&record), vec![23]);
    }

    #[test]
    fn live_out_blank_is_neither_in_nor_out() {
        let mut record = WorkerRecord::new("r-3", "Cora");
        record.housemaid_status = Some("LANDED_IN_DUBAI".to_string());
        assert_eq!(matching(&record), vec![23]);

        record.live_out = Some(false);
        assert_eq!(matching(&record), vec![14, 23]);

        record.live_out = Some(true);
        assert_eq!(matching(&record), vec![15, 23]);
    }

    #[test]
    fn ethiopian_pending_coc_splits_on_days() {
        let mut record = WorkerRecord::new("r-4", "Dina");
        record.nationality = "Ethiopian".to_string();
        record.stage_in_operator_page = Some("Pending COC".to_string());
        record.live_out = Some(false);
        record.days_in_table = Some(10.0);
        assert_eq!(matching(&record), vec![21, 23]);

        record.days_in_table = Some(11.0);
        assert_eq!(matching(&record), vec![9, 21, 23]);
    }
}
