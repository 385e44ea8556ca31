use qrcode::QrCode;
use qrcode::render::unicode;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{error, info, warn};

use courier_session::SessionEvent;

/// Operator console for the session lifecycle. Pairing codes are drawn as a
/// terminal QR code on stdout.
pub async fn report_session_events(mut rx: broadcast::Receiver<SessionEvent>) {
    loop {
        match rx.recv().await {
            Ok(SessionEvent::Qr(code)) => match render_qr(&code) {
                Some(qr) => {
                    println!("{}", qr);
                    info!("Scan the QR code above with the phone to link this session");
                }
                None => warn!("Pairing code could not be drawn, raw value: {}", code),
            },
            Ok(SessionEvent::Authenticated) => info!("Session authenticated"),
            Ok(SessionEvent::Ready) => info!("Messaging client is ready"),
            Ok(SessionEvent::AuthFailure(reason)) => error!("Session authentication failed: {}", reason),
            Ok(SessionEvent::Disconnected(reason)) => warn!("Session disconnected: {}", reason),
            Err(RecvError::Lagged(n)) => warn!("Missed {} session events", n),
            Err(RecvError::Closed) => break,
        }
    }
}

pub fn render_qr(data: &str) -> Option<String> {
    let code = QrCode::new(data.as_bytes()).ok()?;
    Some(
        code.render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .build(),
    )
}
