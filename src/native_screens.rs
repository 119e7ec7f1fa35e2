use std::mem;

use windows::{
    core::BOOL,
    Win32::{
        Foundation::{LPARAM, RECT},
        Graphics::Gdi::{EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFOEXW},
        UI::HiDpi::{SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2},
    },
};

use crate::{
    data_loaders::screens::{Rect, ScreenRecord},
    warn,
};

const MONITORINFOF_PRIMARY: u32 = 1;

fn enable_per_monitor_dpi_awareness() {
    unsafe {
        if SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2).is_err() {
            warn!("[SCREENS] Failed to set process DPI awareness to PerMonitorV2; monitor sizes may be scaled");
        }
    }
}

fn to_rect(rect: RECT) -> Rect {
    Rect::new(rect.left, rect.top, rect.right - rect.left, rect.bottom - rect.top)
}

/// Monitors in the order Windows enumerates them, in physical pixels.
pub fn enumerate() -> Vec<ScreenRecord> {
    unsafe extern "system" fn enum_monitor_proc(
        monitor: HMONITOR,
        _hdc: HDC,
        _rect: *mut RECT,
        lparam: LPARAM,
    ) -> BOOL {
        let records = &mut *(lparam.0 as *mut Vec<ScreenRecord>);

        let mut info: MONITORINFOEXW = mem::zeroed();
        info.monitorInfo.cbSize = mem::size_of::<MONITORINFOEXW>() as u32;

        if GetMonitorInfoW(monitor, &mut info as *mut MONITORINFOEXW as *mut _).as_bool() {
            let name_len = info.szDevice.iter().position(|&c| c == 0).unwrap_or(info.szDevice.len());
            records.push(ScreenRecord {
                bits_per_pixel: None,
                bounds: to_rect(info.monitorInfo.rcMonitor),
                device_name: String::from_utf16_lossy(&info.szDevice[..name_len]),
                primary: info.monitorInfo.dwFlags & MONITORINFOF_PRIMARY != 0,
                working_area: Some(to_rect(info.monitorInfo.rcWork)),
            });
        }

        BOOL(1)
    }

    enable_per_monitor_dpi_awareness();

    let mut records = Vec::<ScreenRecord>::new();
    unsafe {
        let _ = EnumDisplayMonitors(
            None,
            None,
            Some(enum_monitor_proc),
            LPARAM((&mut records as *mut Vec<ScreenRecord>) as isize),
        );
    }

    records
}
