//! 端末制御（raw モード・ウィンドウサイズ）

use std::io;
use std::os::unix::io::RawFd;

/// fd が端末か
pub fn is_tty(fd: RawFd) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}

/// 端末の (行数, 桁数)。端末でなければ 24x80。
pub fn window_size(fd: RawFd) -> (u16, u16) {
    unsafe {
        let mut ws: libc::winsize = std::mem::zeroed();
        if libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws) < 0 || ws.ws_row == 0 {
            return (24, 80);
        }
        (ws.ws_row, ws.ws_col)
    }
}

/// raw モードに切り替え、drop 時に元の termios へ戻すガード
pub struct TermMode {
    saved_termios: Option<libc::termios>,
    fd: RawFd,
}

impl TermMode {
    pub fn set_raw(fd: RawFd) -> io::Result<Self> {
        unsafe {
            if libc::isatty(fd) == 0 {
                return Ok(TermMode {
                    saved_termios: None,
                    fd,
                });
            }
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &mut termios) < 0 {
                return Err(io::Error::last_os_error());
            }
            let saved = termios;

            libc::cfmakeraw(&mut termios);
            if libc::tcsetattr(fd, libc::TCSANOW, &termios) < 0 {
                return Err(io::Error::last_os_error());
            }

            Ok(TermMode {
                saved_termios: Some(saved),
                fd,
            })
        }
    }
}

impl Drop for TermMode {
    fn drop(&mut self) {
        if let Some(saved) = self.saved_termios {
            unsafe {
                libc::tcsetattr(self.fd, libc::TCSANOW, &saved);
            }
        }
    }
}

/// fd が読み取り可能になるまで最大 `timeout_ms` 待つ
pub fn wait_readable(fd: RawFd, timeout_ms: i32) -> io::Result<bool> {
    let mut pfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let n = unsafe { libc::poll(&mut pfd, 1, timeout_ms) };
    if n < 0 {
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            return Ok(false);
        }
        return Err(err);
    }
    Ok(n > 0 && (pfd.revents & (libc::POLLIN | libc::POLLHUP)) != 0)
}

/// fd から読めるだけ読む（0 は EOF）
pub fn read_fd(fd: RawFd, buf: &mut [u8]) -> io::Result<usize> {
    let n = unsafe { libc::read(fd, buf.as_mut_ptr() as *mut libc::c_void, buf.len()) };
    if n < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(n as usize)
}
