//! Runtime behaviour of the generated mappers.

use mapper_fixture::dto::{Tally, UserDto};
use mapper_fixture::mappers::{
    tally_list_mapper, tally_mapper, user_summary_list_mapper, user_summary_mapper,
};
use mapper_fixture::models::{profile::Profile, sample::Sample, user::User};
use rstest::{fixture, rstest};

#[fixture]
fn user() -> User {
    User {
        id: 7,
        name: "Ada".to_owned(),
        email: Some("ada@users.example".to_owned()),
        scores: vec![1, 2, 255],
        ratio: Some(0.5),
        active: false,
        count: 40,
    }
}

#[fixture]
fn profile() -> Profile {
    Profile {
        email: Some("ada@profiles.example".to_owned()),
        extra: 2,
        nick: Some("countess".to_owned()),
        active: true,
    }
}

#[rstest]
fn maps_every_field_when_all_sources_are_present(user: User, profile: Profile) {
    let dto = user_summary_mapper(Some(&user), Some(&profile)).expect("destination");
    assert_eq!(dto.id, 7);
    assert_eq!(dto.name.as_deref(), Some("Ada"));
    assert_eq!(dto.scores, vec![1, 2, 255]);
    assert_eq!(dto.ratio, Some(0.5));
    assert_eq!(dto.total, 42);
    assert_eq!(dto.nickname, "countess");
    assert!(dto.meta.is_empty());
}

#[rstest]
fn later_sources_win(user: User, profile: Profile) {
    let dto = user_summary_mapper(Some(&user), Some(&profile)).expect("destination");
    assert_eq!(dto.email, "ada@profiles.example");
    assert!(dto.active);
}

#[rstest]
fn absent_optional_fields_keep_defaults(user: User, mut profile: Profile) {
    profile.email = None;
    profile.nick = None;
    let dto = user_summary_mapper(Some(&user), Some(&profile)).expect("destination");
    assert_eq!(dto.email, "");
    assert_eq!(dto.nickname, "");
}

#[rstest]
fn relations_over_both_sources_wait_for_both(user: User) {
    let dto = user_summary_mapper(Some(&user), None).expect("destination");
    assert_eq!(dto.id, 7);
    assert_eq!(dto.total, 0);
    assert_eq!(dto.nickname, "");
    assert!(!dto.active);
}

#[rstest]
fn relations_over_one_source_run_without_the_others(profile: Profile) {
    let dto = user_summary_mapper(None, Some(&profile)).expect("destination");
    assert_eq!(dto.nickname, "countess");
    assert_eq!(dto.email, "ada@profiles.example");
    assert_eq!(dto.total, 0);
    assert_eq!(dto.id, 0);
}

#[test]
fn no_sources_yield_no_destination() {
    assert_eq!(user_summary_mapper(None, None), None);
}

#[rstest]
fn list_mapper_stops_at_the_shortest_input(user: User, profile: Profile) {
    let users = [Some(&user), None, Some(&user)];
    let profiles = [Some(&profile), None];
    let mapped: Vec<Option<UserDto>> = user_summary_list_mapper(&users, &profiles);
    assert_eq!(mapped.len(), 2);
    assert!(mapped[0].is_some());
    assert_eq!(mapped[1], None);
}

#[test]
fn numeric_values_are_cast_and_wrapped() {
    let sample = Sample {
        count: 3,
        samples: vec![0.5, 1.5, -2.0],
    };
    let tally = tally_mapper(Some(&sample)).expect("destination");
    assert_eq!(
        tally,
        Tally {
            count: Some(3),
            samples: vec![Some(0.5), Some(1.5), Some(-2.0)],
        }
    );
    assert_eq!(tally_list_mapper(&[Some(&sample), None]).len(), 2);
}
