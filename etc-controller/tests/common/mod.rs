use etc_controller::EtcController;
use shared::etc_mock::EtcDriverMock;

/// Moves the mock clock forward. Timing scenarios step time explicitly
/// instead of sleeping.
pub fn advance_time(etc: &mut EtcController, dt_s: f32) {
    etc.driver
        .as_mut_any()
        .downcast_mut::<EtcDriverMock>()
        .expect("tests drive the mock driver")
        .advance_time(dt_s);
}
