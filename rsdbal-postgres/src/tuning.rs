//! Connect-time socket tuning
//!
//! libpq handles the `tcp_user_timeout` connection option itself since
//! v12. With an older client library the option must not reach the
//! native parser, the session extracts it and applies it here. The
//! strategy is picked once per connect, based on the platform.

use rsdbal_core::Error;

/// How a receive-timeout override is applied to the socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TcpTimeoutStrategy {
    /// setsockopt(TCP_USER_TIMEOUT), skipped for AF_UNIX sockets
    TcpUserTimeout,
    /// No support on this platform, the option is accepted and ignored
    Ignore,
}

impl TcpTimeoutStrategy {
    pub fn detect() -> Self {
        #[cfg(any(target_os = "linux", target_os = "android"))]
        {
            TcpTimeoutStrategy::TcpUserTimeout
        }
        #[cfg(not(any(target_os = "linux", target_os = "android")))]
        {
            TcpTimeoutStrategy::Ignore
        }
    }
}

/// Eager validation of the option value, raised before any native
/// connection attempt.
pub(crate) fn parse_timeout_ms(value: &str) -> Result<i64, Error> {
    let ms = value.trim().parse::<i64>().map_err(|_| {
        Error::Parse(format!(
            "invalid value for tcp_user_timeout connection option: \"{}\"",
            value
        ))
    })?;

    // The socket option takes an unsigned 32 bit millisecond count.
    if ms > u32::MAX as i64 {
        return Err(Error::Parse(format!(
            "tcp_user_timeout connection option value {} is out of range",
            ms
        )));
    }

    Ok(ms)
}

/// Apply the timeout to an established connection's socket.
///
/// Zero means system default and negative values are ignored by libpq,
/// both are accepted and skipped here for consistency.
pub(crate) fn apply_tcp_user_timeout(
    strategy: TcpTimeoutStrategy,
    socket: i32,
    timeout_ms: i64,
) -> Result<(), Error> {
    if timeout_ms <= 0 {
        return Ok(());
    }

    match strategy {
        TcpTimeoutStrategy::TcpUserTimeout => set_socket_user_timeout(socket, timeout_ms),
        TcpTimeoutStrategy::Ignore => Ok(()),
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn set_socket_user_timeout(socket: i32, timeout_ms: i64) -> Result<(), Error> {
    use std::mem;

    // The option only makes sense for an AF_INET socket.
    unsafe {
        let mut sa: libc::sockaddr_storage = mem::zeroed();
        let mut sa_len = mem::size_of::<libc::sockaddr_storage>() as libc::socklen_t;
        if libc::getsockname(socket, &mut sa as *mut _ as *mut libc::sockaddr, &mut sa_len) != 0 {
            return Err(Error::Connection(format!(
                "failed to get socket address: {}",
                std::io::Error::last_os_error()
            )));
        }

        if sa.ss_family == libc::AF_UNIX as libc::sa_family_t {
            return Ok(());
        }

        let timeout = timeout_ms as libc::c_uint;
        if libc::setsockopt(
            socket,
            libc::IPPROTO_TCP,
            libc::TCP_USER_TIMEOUT,
            &timeout as *const _ as *const libc::c_void,
            mem::size_of::<libc::c_uint>() as libc::socklen_t,
        ) != 0
        {
            return Err(Error::Connection(format!(
                "failed to set TCP_USER_TIMEOUT option on the socket: {}",
                std::io::Error::last_os_error()
            )));
        }
    }

    Ok(())
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn set_socket_user_timeout(_socket: i32, _timeout_ms: i64) -> Result<(), Error> {
    Ok(())
}
