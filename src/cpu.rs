use std::sync::OnceLock;

use bitflags::bitflags;
use cfg_if::cfg_if;

bitflags! {
    /// Vector instruction families available on the running processor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CpuFlags: u32 {
        const MMX = 1 << 0;
        /// AMD extended MMX (integer SSE subset).
        const MMXEXT = 1 << 1;
        const SSE = 1 << 2;
        const SSE2 = 1 << 3;
        const SSE3 = 1 << 4;
        const SSSE3 = 1 << 5;
        const SSE41 = 1 << 6;
        const AVX2 = 1 << 7;
        const NEON = 1 << 8;
    }
}

const FLAG_NAMES: &[(CpuFlags, &str)] = &[
    (CpuFlags::MMX, "mmx"),
    (CpuFlags::MMXEXT, "mmxext"),
    (CpuFlags::SSE, "sse"),
    (CpuFlags::SSE2, "sse2"),
    (CpuFlags::SSE3, "sse3"),
    (CpuFlags::SSSE3, "ssse3"),
    (CpuFlags::SSE41, "sse4.1"),
    (CpuFlags::AVX2, "avx2"),
    (CpuFlags::NEON, "neon"),
];

impl CpuFlags {
    /// Feature names in a fixed order, for diagnostics.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        FLAG_NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }

    /// Whether the vectorised kernels may be installed.
    #[must_use]
    pub fn accelerated(self) -> bool {
        !cfg!(feature = "no_simd") && self.contains(Self::AVX2)
    }
}

/// What the processor reported about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuInfo {
    /// The CPUID vendor string, e.g. `GenuineIntel`. Empty when unavailable.
    pub vendor: String,
    pub flags: CpuFlags,
}

static CPU_INFO: OnceLock<CpuInfo> = OnceLock::new();

/// Probes the processor once; later calls return the cached result.
pub fn detect() -> &'static CpuInfo {
    CPU_INFO.get_or_init(|| {
        let info = probe();
        log::debug!(
            "cpu vendor {:?}, features [{}]",
            info.vendor,
            info.flags.names().join(" ")
        );
        info
    })
}

cfg_if! {
    if #[cfg(any(target_arch = "x86", target_arch = "x86_64"))] {
        cpufeatures::new!(cpuid_mmx, "mmx");
        cpufeatures::new!(cpuid_sse, "sse");
        cpufeatures::new!(cpuid_sse2, "sse2");
        cpufeatures::new!(cpuid_sse3, "sse3");
        cpufeatures::new!(cpuid_ssse3, "ssse3");
        cpufeatures::new!(cpuid_sse41, "sse4.1");
        cpufeatures::new!(cpuid_avx2, "avx2");

        pub use cpuid_avx2::get as has_avx2;

        #[cfg(target_arch = "x86")]
        use std::arch::x86::__cpuid;
        #[cfg(target_arch = "x86_64")]
        use std::arch::x86_64::__cpuid;

        /// Extended feature bit 22 of leaf 0x8000_0001 EDX: AMD MMX extensions.
        const MMXEXT_BIT: u32 = 1 << 22;

        fn probe() -> CpuInfo {
            let checks = [
                (cpuid_mmx::get(), CpuFlags::MMX),
                (cpuid_sse::get(), CpuFlags::SSE),
                (cpuid_sse2::get(), CpuFlags::SSE2),
                (cpuid_sse3::get(), CpuFlags::SSE3),
                (cpuid_ssse3::get(), CpuFlags::SSSE3),
                (cpuid_sse41::get(), CpuFlags::SSE41),
                (cpuid_avx2::get(), CpuFlags::AVX2),
            ];
            let mut flags = CpuFlags::empty();
            for (present, flag) in checks {
                flags.set(flag, present);
            }

            #[allow(unused_unsafe)]
            // SAFETY: every processor this code compiles for implements cpuid.
            let (vendor_leaf, max_ext) = unsafe { (__cpuid(0), __cpuid(0x8000_0000).eax) };
            if max_ext >= 0x8000_0001 {
                #[allow(unused_unsafe)]
                // SAFETY: the extended leaf was reported as supported above.
                let ext = unsafe { __cpuid(0x8000_0001) };
                // Intel never sets this bit, but every SSE processor has the same instructions.
                if ext.edx & MMXEXT_BIT != 0 || flags.contains(CpuFlags::SSE) {
                    flags.insert(CpuFlags::MMXEXT);
                }
            }

            let mut vendor = Vec::with_capacity(12);
            for reg in [vendor_leaf.ebx, vendor_leaf.edx, vendor_leaf.ecx] {
                vendor.extend_from_slice(&reg.to_le_bytes());
            }
            CpuInfo {
                vendor: String::from_utf8_lossy(&vendor).trim_end_matches('\0').to_string(),
                flags,
            }
        }
    } else if #[cfg(target_arch = "aarch64")] {
        fn probe() -> CpuInfo {
            // Advanced SIMD is mandatory on aarch64.
            CpuInfo {
                vendor: String::new(),
                flags: CpuFlags::NEON,
            }
        }

        #[must_use]
        pub fn has_avx2() -> bool {
            false
        }
    } else {
        fn probe() -> CpuInfo {
            CpuInfo {
                vendor: String::new(),
                flags: CpuFlags::empty(),
            }
        }

        #[must_use]
        pub fn has_avx2() -> bool {
            false
        }
    }
}
