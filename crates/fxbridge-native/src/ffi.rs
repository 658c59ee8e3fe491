//! Raw bindings to the vendor engine C API.
//!
//! Libraries are linked by the build script. Every pointer returned here is
//! owned by the vendor library and must go back through the matching
//! `terminate_*` call.

use std::os::raw::{c_int, c_void};

/// Engine configuration record passed to `init_AW_API`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioProfile {
    pub sample_rate: c_int,
    pub chan_num: c_int,
    pub bits_depth: c_int,
    pub frame_len: c_int,
    pub big_endian: c_int,
    pub wav_len: c_int,
    pub msg_snd_id: c_int,
    pub msg_rcv_id: c_int,
    pub opt_rcv_id: c_int,
    pub eq_pattern: c_int,
    pub reverb_pattern: c_int,
    pub eq_profile: [c_int; 10],
    pub total_gain: c_int,
    pub revb_percent: c_int,
    pub revb_hfdamping: c_int,
    pub revb_roomscale: c_int,
    pub revb_depth: c_int,
    pub revb_predelay: c_int,
}

unsafe extern "C" {
    pub fn init_AGC_API(sample_rate: u32, chan_num: c_int, target_dbfs: c_int) -> *mut c_void;
    pub fn runAGC_API(
        obj: *mut c_void,
        in_buffer: *mut i16,
        in_len: c_int,
        out_len: *mut c_int,
    ) -> *mut i16;
    pub fn terminate_AGC_API(obj: *mut c_void);

    pub fn init_NS_API(channels: u32, sample_rate: u32, level: c_int) -> *mut c_void;
    pub fn runNS_API(
        obj: *mut c_void,
        in_buffer: *mut i16,
        in_len: c_int,
        out_len: *mut c_int,
    ) -> *mut i16;
    pub fn terminate_NS_API(obj: *mut c_void);

    pub fn init_AW_API(profile: *mut AudioProfile) -> *mut c_void;
    pub fn runAW_API(obj: *mut c_void, in_buffer: *mut i16, in_len: c_int, out_buffer: *mut c_int);
    pub fn terminate_AW_API(obj: *mut c_void);
    pub fn setEqOption(obj: *mut c_void, band_index: c_int, gain_value: c_int) -> c_int;
}
