//! User-facing texts and trigger phrases.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use roster_core::user::User;

/// Typing this anywhere in a message re-opens segment selection.
pub const CHANGE_SEGMENT_PHRASE: &str = "เปลี่ยนคณะ";

/// Typing this anywhere in a message shows the stored profile.
pub const SHOW_INFO_PHRASE: &str = "ข้อมูลของฉัน";

pub const FALLBACK: &str = "ขอบคุณที่ติดต่อเรา หากต้องการความช่วยเหลือโปรดติดต่อเจ้าหน้าที่";

pub const CHANGE_SEGMENT_PROMPT: &str = "คุณสามารถเลือกคณะใหม่ได้ที่นี่";

pub const NO_RECORD: &str = "ไม่พบข้อมูลของคุณในระบบ กรุณาลองใหม่อีกครั้ง";

pub const FACULTY_NOT_SET: &str = "ยังไม่ได้ระบุ";

pub const BROADCAST_SENT: &str = "ส่งข้อความเรียบร้อยแล้ว";

pub const BROADCAST_EMPTY: &str = "ไม่ได้ระบุข้อความที่ต้องการส่ง";

/// Bangkok is UTC+7 all year.
const BANGKOK: FixedOffset = match FixedOffset::east_opt(7 * 3600) {
  Some(offset) => offset,
  None => panic!("UTC+7 is a valid offset"),
};

/// Buddhist-era years run 543 ahead of the Gregorian calendar.
const BUDDHIST_ERA_OFFSET: i32 = 543;

pub fn welcome(display_name: &str) -> String {
  format!(
    "สวัสดีครับคุณ {display_name} ยินดีต้อนรับสู่ LINE Official ของมหาวิทยาลัย\n\
     เพื่อให้เราสามารถส่งข่าวสารที่เกี่ยวข้องได้ตรงกลุ่ม กรุณาเลือกคณะของคุณ"
  )
}

pub fn segment_confirmed(segment: &str) -> String {
  format!(
    "ขอบคุณที่แจ้งข้อมูล คุณได้รับการติด tag '{segment}' เรียบร้อยแล้ว\n\n\
     คุณจะได้รับข่าวสารที่เกี่ยวข้องกับคณะของคุณโดยเฉพาะ"
  )
}

pub fn help() -> String {
  format!(
    "ขอบคุณสำหรับข้อความ\n\
     - หากต้องการเปลี่ยนคณะ พิมพ์ \"{CHANGE_SEGMENT_PHRASE}\"\n\
     - หากต้องการดูข้อมูลของคุณ พิมพ์ \"{SHOW_INFO_PHRASE}\""
  )
}

pub fn user_info(user: &User) -> String {
  format!(
    "ข้อมูลของคุณ\n\nชื่อ: {}\nคณะ: {}\nลงทะเบียนเมื่อ: {}",
    user.display_name.as_deref().unwrap_or_default(),
    user.faculty.as_deref().unwrap_or(FACULTY_NOT_SET),
    thai_datetime(user.registered_at),
  )
}

/// Render `at` the way a Thai-locale client shows a timestamp:
/// Bangkok time, Buddhist-era year, `d/m/yyyy HH:MM:SS`.
pub fn thai_datetime(at: DateTime<Utc>) -> String {
  let local = at.with_timezone(&BANGKOK);
  format!(
    "{}/{}/{} {:02}:{:02}:{:02}",
    local.day(),
    local.month(),
    local.year() + BUDDHIST_ERA_OFFSET,
    local.hour(),
    local.minute(),
    local.second(),
  )
}
