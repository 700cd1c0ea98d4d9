//! Scripted stand-in for the heart-rate monitor bridge.
//!
//! Sends a BPM trace over UDP that walks a session through one full distress
//! episode: baseline, sustained elevation (triggers the intervention), a
//! stressed plateau, then recovery. Run a session in another terminal first:
//!
//! ```text
//! cargo run --bin pulsegate -- --calming calm-meadow --content spider-far
//! cargo run --example simulate_subject
//! ```

use std::net::UdpSocket;
use std::thread::sleep;
use std::time::Duration;

fn main() -> std::io::Result<()> {
    let target = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:12345".to_string());

    let socket = UdpSocket::bind("127.0.0.1:0")?;
    socket.connect(&target)?;
    println!("sending BPM trace to {target}");

    // (bpm, seconds to hold it)
    let trace: &[(u16, u64)] = &[
        (72, 5),  // baseline
        (95, 5),  // sustained elevation: intervention triggers after 3s
        (97, 10), // stressed through the cool-down floor
        (88, 3),  // easing, but still above the recovery threshold
        (80, 5),  // recovered: session resumes prior content
        (74, 3),  // back to baseline
    ];

    for &(bpm, secs) in trace {
        println!("  {bpm} BPM for {secs}s");
        for _ in 0..secs {
            socket.send(bpm.to_string().as_bytes())?;
            sleep(Duration::from_secs(1));
        }
    }

    println!("trace complete");
    Ok(())
}
