use crate::errors::Result;

/// The SDL subsystems a window needs. SDL shuts down when the last of these is dropped.
pub struct SdlSetup {
    pub sdl_context: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub timer_subsystem: sdl2::TimerSubsystem,
}

pub fn init() -> Result<SdlSetup> {

    let sdl_context = sdl2::init().map_err(|e| format!("Failed to initialise SDL: {}", e))?;
    let video_subsystem = sdl_context.video()
        .map_err(|e| format!("Failed to initialise SDL video: {}", e))?;
    let timer_subsystem = sdl_context.timer()
        .map_err(|e| format!("Failed to initialise SDL timers: {}", e))?;

    Ok(SdlSetup {
        sdl_context,
        video_subsystem,
        timer_subsystem,
    })
}
