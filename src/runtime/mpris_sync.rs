use crate::app::App;
use crate::mpris::MprisHandle;

pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    mpris.set_track_metadata(app.order.current(), app.now_playing());
    mpris.set_playback(app.playback());
}
