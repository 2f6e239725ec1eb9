use super::*;

#[test]
fn onboarded_visitors_land_on_dashboard() {
    assert_eq!(landing_route(true), "/dashboard");
}

#[test]
fn new_visitors_land_on_onboarding() {
    assert_eq!(landing_route(false), "/onboarding");
}
