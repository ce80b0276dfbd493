// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    audit_events (event_id) {
        event_id -> BigInt,
        employee_id -> Text,
        leave_type -> Text,
        leave_type_key -> Text,
        application_id -> Nullable<BigInt>,
        actor_json -> Text,
        cause_json -> Text,
        action_json -> Text,
        before_snapshot_json -> Text,
        after_snapshot_json -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    employees (employee_id) {
        employee_id -> Text,
        employee_code -> Text,
        display_name -> Text,
        policy_group_id -> Nullable<BigInt>,
        created_at -> Text,
    }
}

diesel::table! {
    leave_applications (application_id) {
        application_id -> BigInt,
        employee_id -> Text,
        leave_type -> Text,
        leave_type_key -> Text,
        from_date -> Text,
        to_date -> Text,
        half_day -> Integer,
        reason -> Text,
        status -> Text,
        attachment -> Nullable<Text>,
        policy_snapshot_json -> Nullable<Text>,
        created_by -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    ledger_sequences (employee_id, leave_type_key) {
        employee_id -> Text,
        leave_type_key -> Text,
        sequence -> BigInt,
    }
}

diesel::table! {
    policy_groups (policy_group_id) {
        policy_group_id -> BigInt,
        group_name -> Text,
        description -> Text,
        is_active -> Integer,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    policy_records (policy_record_id) {
        policy_record_id -> BigInt,
        policy_group_id -> BigInt,
        position -> Integer,
        leave_type_id -> Text,
        leave_type_name -> Text,
        policy_json -> Text,
    }
}

diesel::joinable!(audit_events -> employees (employee_id));
diesel::joinable!(audit_events -> leave_applications (application_id));
diesel::joinable!(employees -> policy_groups (policy_group_id));
diesel::joinable!(leave_applications -> employees (employee_id));
diesel::joinable!(ledger_sequences -> employees (employee_id));
diesel::joinable!(policy_records -> policy_groups (policy_group_id));

diesel::allow_tables_to_appear_in_same_query!(
    audit_events,
    employees,
    leave_applications,
    ledger_sequences,
    policy_groups,
    policy_records,
);
