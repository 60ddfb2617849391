//! IdGenerator port - セッション ID の生成
//!
//! タスク ID はリモートストアが採番するので、ここで作るのは
//! クライアント側のセッション ID だけです。

use crate::domain::SessionId;
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator はセッション ID を生成
pub trait IdGenerator: Send + Sync {
    fn generate_session_id(&self) -> SessionId;
}

/// ULID ベースの生成器
///
/// Clock から timestamp を取るので、FixedClock を使うと timestamp 部分が
/// 決定的になります（ランダム部分は毎回異なる）。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_session_id(&self) -> SessionId {
        let timestamp_ms = self.clock.now().timestamp_millis().max(0) as u64;
        SessionId::from(Ulid::from_parts(timestamp_ms, rand::random()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};

    #[test]
    fn generates_unique_ids() {
        let id_gen = UlidGenerator::new(SystemClock);
        let a = id_gen.generate_session_id();
        let b = id_gen.generate_session_id();
        assert_ne!(a, b);
    }

    #[test]
    fn fixed_clock_pins_the_timestamp() {
        let fixed_time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let id_gen = UlidGenerator::new(FixedClock::new(fixed_time));

        let a = id_gen.generate_session_id();
        let b = id_gen.generate_session_id();
        assert_ne!(a, b);

        let ts_a = (a.as_ulid().0 >> 80) as u64;
        let ts_b = (b.as_ulid().0 >> 80) as u64;
        assert_eq!(ts_a, ts_b);
        assert_eq!(ts_a, fixed_time.timestamp_millis() as u64);
    }
}
